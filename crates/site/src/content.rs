//! Portfolio content.
//!
//! The site's copy lives in code rather than on disk: it is small, changes
//! with deploys, and doubles as the default input to personalization.

use std::fmt::Write as _;

use serde::Serialize;

/// Opening section of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
}

/// A showcased project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub code_link: &'static str,
    pub demo_link: Option<&'static str>,
}

/// A skill and the owner's self-assessed level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub level: &'static str,
}

/// A service offered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
}

/// Link to an external profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub network: &'static str,
    pub href: &'static str,
}

/// Everything the portfolio page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub hero: Hero,
    pub projects: &'static [Project],
    pub skills: &'static [Skill],
    pub services: &'static [Service],
    pub social_links: &'static [SocialLink],
}

const PROJECTS: &[Project] = &[Project {
    title: "AlmaZen Inventario",
    description: "AlmaZen es una interfaz web para gestionar almacenes, creada con JSP, \
                  JavaScript y CSS. Incluye secciones como inventario, empleados y ventas. \
                  Proyecto en desarrollo abierto a colaboradores.",
    technologies: &["Java"],
    code_link: "https://github.com/alowincr",
    demo_link: None,
}];

const SKILLS: &[Skill] = &[
    Skill {
        name: "HTML",
        level: "Intermedio",
    },
    Skill {
        name: "CSS",
        level: "Intermedio",
    },
    Skill {
        name: "JavaScript",
        level: "Intermedio",
    },
    Skill {
        name: "React",
        level: "Intermedio",
    },
    Skill {
        name: "Node.js",
        level: "Intermedio",
    },
    Skill {
        name: "Python",
        level: "Avanzado",
    },
    Skill {
        name: "Java",
        level: "Intermedio",
    },
    Skill {
        name: "Git",
        level: "Intermedio",
    },
];

const SERVICES: &[Service] = &[
    Service {
        title: "Desarrollo Frontend",
        description: "Creación de interfaces de usuario interactivas y responsivas con las \
                      últimas tecnologías como React y Next.js.",
    },
    Service {
        title: "Desarrollo Backend",
        description: "Diseño y construcción de APIs robustas y escalables, y lógica de \
                      servidor con Node.js, Python y bases de datos.",
    },
    Service {
        title: "Diseño UI/UX",
        description: "Enfoque en la experiencia de usuario para crear diseños intuitivos, \
                      funcionales y estéticamente agradables.",
    },
];

const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        network: "GitHub",
        href: "https://github.com/alowincr",
    },
    SocialLink {
        network: "LinkedIn",
        href: "https://www.linkedin.com/in/alonso-carbajal-b10901212/",
    },
];

impl Portfolio {
    /// The site's own content.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            hero: Hero {
                name: "Alonso Carbajal",
                role: "Ingeniero de Sistemas",
                description: "Apasionado por crear soluciones tecnológicas innovadoras. \
                              Especializado en desarrollo web full-stack con experiencia en \
                              tecnologías modernas y metodologías ágiles.",
            },
            projects: PROJECTS,
            skills: SKILLS,
            services: SERVICES,
            social_links: SOCIAL_LINKS,
        }
    }

    /// Plain-text rendering used as personalization input.
    #[must_use]
    pub fn to_prompt_text(&self) -> String {
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "Hero:");
        let _ = writeln!(out, "- Name: {}", self.hero.name);
        let _ = writeln!(out, "- Role: {}", self.hero.role);
        let _ = writeln!(out, "- Description: {}", self.hero.description);

        let _ = writeln!(out, "\nProjects:");
        for (i, project) in self.projects.iter().enumerate() {
            let _ = write!(
                out,
                "{}. {}: {} Technologies: {}.",
                i + 1,
                project.title,
                project.description,
                project.technologies.join(", ")
            );
            if let Some(demo) = project.demo_link {
                let _ = write!(out, " Demo: {demo}.");
            }
            let _ = writeln!(out, " Code: {}", project.code_link);
        }

        let _ = writeln!(out, "\nSkills:");
        for skill in self.skills {
            let _ = writeln!(out, "- {}: {}", skill.name, skill.level);
        }

        let _ = writeln!(out, "\nServices:");
        for service in self.services {
            let _ = writeln!(out, "- {}: {}", service.title, service.description);
        }

        out
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::site()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_sections() {
        let text = Portfolio::site().to_prompt_text();

        assert!(text.starts_with("Hero:\n- Name: Alonso Carbajal\n"));
        assert!(text.contains("\nProjects:\n1. AlmaZen Inventario: "));
        assert!(text.contains("Technologies: Java."));
        assert!(text.contains("\nSkills:\n- HTML: Intermedio\n"));
        assert!(text.contains("- Python: Avanzado\n"));
        assert!(text.contains("\nServices:\n- Desarrollo Frontend: "));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Portfolio::site()).unwrap();

        assert_eq!(json["hero"]["role"], "Ingeniero de Sistemas");
        assert_eq!(json["projects"][0]["codeLink"], "https://github.com/alowincr");
        assert!(json["projects"][0]["demoLink"].is_null());
        assert_eq!(json["socialLinks"].as_array().unwrap().len(), 2);
    }
}
