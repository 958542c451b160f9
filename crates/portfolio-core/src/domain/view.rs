//! Display helpers for stored portfolio values.
//!
//! The stored document is never corrected in place.  Whatever the operator
//! saved is kept verbatim; these helpers only decide how a raw value is shown.

use super::schema::{Certification, Learning, QualificationType};

/// Icons the site knows how to draw for a tech stack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechIcon {
    TestTube2,
    Globe,
    Terminal,
    Code2,
    Cpu,
    BrainCircuit,
    Zap,
}

impl TechIcon {
    /// Every known icon, in the order the admin panel lists them.
    pub const ALL: [TechIcon; 7] = [
        TechIcon::TestTube2,
        TechIcon::Globe,
        TechIcon::Terminal,
        TechIcon::Code2,
        TechIcon::Cpu,
        TechIcon::BrainCircuit,
        TechIcon::Zap,
    ];

    /// Icon drawn for identifiers outside the known set.
    pub const FALLBACK: TechIcon = TechIcon::Code2;

    /// The identifier stored in `techStack[].icon`.
    pub fn identifier(self) -> &'static str {
        match self {
            TechIcon::TestTube2 => "TestTube2",
            TechIcon::Globe => "Globe",
            TechIcon::Terminal => "Terminal",
            TechIcon::Code2 => "Code2",
            TechIcon::Cpu => "Cpu",
            TechIcon::BrainCircuit => "BrainCircuit",
            TechIcon::Zap => "Zap",
        }
    }

    /// Resolves a stored identifier.  Unknown identifiers are not an error;
    /// they render as [`TechIcon::FALLBACK`].  Matching is case-sensitive.
    pub fn resolve(identifier: &str) -> TechIcon {
        Self::ALL
            .into_iter()
            .find(|icon| icon.identifier() == identifier)
            .unwrap_or(Self::FALLBACK)
    }
}

impl QualificationType {
    /// Human label shown on the page.
    pub fn label(self) -> &'static str {
        match self {
            QualificationType::Graduation => "Graduação",
            QualificationType::Postgraduate => "Pós-graduação",
            QualificationType::Masters => "Mestrado",
            QualificationType::Doctorate => "Doutorado",
            QualificationType::Specialization => "Especialização",
            QualificationType::Course => "Curso",
            QualificationType::Bootcamp => "Bootcamp",
        }
    }
}

impl Learning {
    /// Progress bar width in percent.  The stored value is left untouched.
    pub fn display_progress(&self) -> u8 {
        // Clamped into 0..=100, so the cast cannot truncate.
        self.progress.clamp(0, 100) as u8
    }
}

impl Certification {
    /// The credential link, if there is one.  Absent and empty are the same;
    /// any other string is returned exactly as stored.
    pub fn credential_link(&self) -> Option<&str> {
        self.credential_url.as_deref().filter(|url| !url.is_empty())
    }
}
