//! Variant slots: output files with several candidate sources
//!
//! Each slot picks exactly one candidate through an exhaustive match on the
//! answers, so adding a preprocessor is a compile error until every slot
//! handles it.

use crate::answers::{AnswerSet, CssPreprocessor};
use std::fmt;

/// Logical output files whose source depends on the answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantSlot {
    /// The webpack build configuration
    WebpackConfig,
}

impl VariantSlot {
    pub const ALL: [VariantSlot; 1] = [VariantSlot::WebpackConfig];

    /// Fixed destination path, relative to the project root
    pub fn destination(&self) -> &'static str {
        match self {
            VariantSlot::WebpackConfig => "webpack.config.js",
        }
    }

    /// Every candidate this slot can resolve to, fallback first
    pub fn candidates(&self) -> Vec<TemplateId> {
        CssPreprocessor::ALL
            .iter()
            .map(|css| self.candidate_for(*css))
            .collect()
    }

    fn candidate_for(&self, css: CssPreprocessor) -> TemplateId {
        match (self, css) {
            (VariantSlot::WebpackConfig, CssPreprocessor::Css) => {
                TemplateId("webpack/default/_webpack.config.js")
            }
            (VariantSlot::WebpackConfig, CssPreprocessor::Scss) => {
                TemplateId("webpack/scss/_webpack.config.js")
            }
            (VariantSlot::WebpackConfig, CssPreprocessor::Less) => {
                TemplateId("webpack/less/_webpack.config.js")
            }
        }
    }
}

impl fmt::Display for VariantSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.destination())
    }
}

/// Path of a candidate source file inside the template tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(pub &'static str);

impl TemplateId {
    pub fn path(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A slot together with the candidate chosen for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub slot: VariantSlot,
    pub source: TemplateId,
}

impl Resolution {
    pub fn destination(&self) -> &'static str {
        self.slot.destination()
    }
}

/// Choose the source template for a slot. Never fails.
pub fn select_variant(slot: VariantSlot, answers: &AnswerSet) -> TemplateId {
    slot.candidate_for(answers.css_preprocessor)
}

/// Resolve every declared slot
pub fn resolve_all(answers: &AnswerSet) -> Vec<Resolution> {
    VariantSlot::ALL
        .iter()
        .map(|slot| Resolution {
            slot: *slot,
            source: select_variant(*slot, answers),
        })
        .collect()
}
