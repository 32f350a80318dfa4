//! Score bands over a cross-deck ranking.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cross::CrossDeckRanking;
use crate::error::ConfigError;

/// Coarse bucket for a correspondence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Identical,
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identical => "identical",
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower edges of the strong and moderate bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandEdges {
    strong: f64,
    moderate: f64,
}

impl BandEdges {
    pub fn new(strong: f64, moderate: f64) -> Result<Self, ConfigError> {
        ConfigError::check_unit("report.strong", strong)?;
        ConfigError::check_unit("report.moderate", moderate)?;
        if moderate > strong {
            return Err(ConfigError::BandOrdering { strong, moderate });
        }
        Ok(Self { strong, moderate })
    }

    pub fn strong(&self) -> f64 {
        self.strong
    }

    pub fn moderate(&self) -> f64 {
        self.moderate
    }

    /// Band for `score`. Only a perfect 1.0 is identical.
    pub fn classify(&self, score: f64) -> ScoreBand {
        if score >= 1.0 {
            ScoreBand::Identical
        } else if score >= self.strong {
            ScoreBand::Strong
        } else if score >= self.moderate {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }
}

impl Default for BandEdges {
    fn default() -> Self {
        Self {
            strong: 0.8,
            moderate: 0.6,
        }
    }
}

/// One banded correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandEntry {
    pub source: usize,
    pub target: usize,
    pub score: f64,
}

/// Forward correspondences grouped by band, plus unmatched source slides.
///
/// Every candidate of every source slide is placed, so one source slide may
/// appear in several bands. Candidates below the moderate edge are dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BandedReport {
    pub identical: Vec<BandEntry>,
    pub strong: Vec<BandEntry>,
    pub moderate: Vec<BandEntry>,
    /// Source slides with no candidate in the ranking.
    pub unmatched: Vec<usize>,
}

impl BandedReport {
    pub fn from_ranking(ranking: &CrossDeckRanking, edges: &BandEdges) -> Self {
        let mut report = Self::default();
        for slide in &ranking.forward {
            if slide.is_unmatched() {
                report.unmatched.push(slide.index);
                continue;
            }
            for candidate in &slide.candidates {
                let entry = BandEntry {
                    source: slide.index,
                    target: candidate.index,
                    score: candidate.score,
                };
                match edges.classify(candidate.score) {
                    ScoreBand::Identical => report.identical.push(entry),
                    ScoreBand::Strong => report.strong.push(entry),
                    ScoreBand::Moderate => report.moderate.push(entry),
                    ScoreBand::Weak => {}
                }
            }
        }
        report
    }

    pub fn entries(&self, band: ScoreBand) -> &[BandEntry] {
        match band {
            ScoreBand::Identical => &self.identical,
            ScoreBand::Strong => &self.strong,
            ScoreBand::Moderate => &self.moderate,
            ScoreBand::Weak => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::cross::{Candidate, RankedSlide};

    fn ranked(index: usize, scores: &[(usize, f64)]) -> RankedSlide {
        RankedSlide {
            index,
            title: None,
            candidates: scores
                .iter()
                .map(|&(target, score)| Candidate {
                    index: target,
                    score,
                    evidence: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_classify_edges() {
        let edges = BandEdges::default();
        assert_eq!(edges.classify(1.0), ScoreBand::Identical);
        assert_eq!(edges.classify(0.99), ScoreBand::Strong);
        assert_eq!(edges.classify(0.8), ScoreBand::Strong);
        assert_eq!(edges.classify(0.79), ScoreBand::Moderate);
        assert_eq!(edges.classify(0.6), ScoreBand::Moderate);
        assert_eq!(edges.classify(0.59), ScoreBand::Weak);
    }

    #[test]
    fn test_edges_validation() {
        assert!(BandEdges::new(0.9, 0.5).is_ok());
        assert!(BandEdges::new(0.7, 0.7).is_ok());
        assert_eq!(
            BandEdges::new(0.5, 0.9),
            Err(ConfigError::BandOrdering {
                strong: 0.5,
                moderate: 0.9
            })
        );
        assert!(matches!(
            BandEdges::new(1.5, 0.5),
            Err(ConfigError::OutOfRange {
                name: "report.strong",
                ..
            })
        ));
    }

    #[test]
    fn test_report_from_ranking() {
        let ranking = CrossDeckRanking {
            forward: vec![
                ranked(0, &[(2, 1.0), (0, 0.85)]),
                ranked(1, &[]),
                ranked(2, &[(1, 0.7), (3, 0.55)]),
            ],
            backward: Vec::new(),
        };

        let report = BandedReport::from_ranking(&ranking, &BandEdges::default());
        assert_eq!(report.identical.len(), 1);
        assert_eq!((report.identical[0].source, report.identical[0].target), (0, 2));
        assert_eq!(report.strong.len(), 1);
        assert_eq!(report.strong[0].target, 0);
        assert_eq!(report.entries(ScoreBand::Moderate).len(), 1);
        assert_eq!(report.moderate[0].source, 2);
        assert_eq!(report.unmatched, vec![1]);
        assert!(report.entries(ScoreBand::Weak).is_empty());
    }
}
