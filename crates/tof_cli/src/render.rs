//! Human-readable rendering of pair reports.

use console::Style;
use tof_core::analysis::{LENGTH_TOLERANCE, MIN_USABLE_LEN};
use tof_core::jobs::SourcePair;
use tof_core::models::{
    AnalysisSection, FrameRate, OffsetCandidate, PairAnalysis, PairReport, SectionFinding,
};

pub const ALIGNED_MESSAGE: &str =
    "No timing differences were detected. Left and right clips are aligned.";

/// Formats reports as colored console text.
pub struct Renderer {
    frame_rate: FrameRate,
    red: Style,
    red_bold: Style,
    blue: Style,
    blue_bold: Style,
    yellow: Style,
    yellow_bold: Style,
    white_bold: Style,
}

impl Renderer {
    pub fn new(frame_rate: FrameRate) -> Self {
        Self {
            frame_rate,
            red: Style::new().red(),
            red_bold: Style::new().red().bold(),
            blue: Style::new().blue(),
            blue_bold: Style::new().blue().bold(),
            yellow: Style::new().yellow(),
            yellow_bold: Style::new().yellow().bold(),
            white_bold: Style::new().white().bold(),
        }
    }

    /// `frame N (MM:SS)`.
    pub fn frame(&self, frame: usize) -> String {
        let (minutes, seconds) = self.frame_rate.minutes_seconds(frame);
        format!("frame {} ({:02}:{:02})", frame, minutes, seconds)
    }

    /// Signed offset such as `+12f` or `-3f`.
    pub fn offset(shift: i32) -> String {
        if shift < 0 {
            format!("{}f", shift)
        } else {
            format!("+{}f", shift)
        }
    }

    /// Transient progress line shown while a pair is loaded and analyzed.
    ///
    /// Only pairs with an episode number get one.
    pub fn progress(pair: &SourcePair) -> Option<String> {
        pair.episode.map(|episode| {
            Style::new()
                .white()
                .bold()
                .apply_to(format!("Comparing Episode {:02}...", episode))
                .to_string()
        })
    }

    /// Header line introducing the findings of one pair.
    pub fn pair_header(&self, pair: &SourcePair) -> String {
        let name = |p: &std::path::Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.display().to_string())
        };
        let subject = match pair.episode {
            Some(episode) => format!("Offsets in Episode {:02}", episode),
            None => "Offsets".to_string(),
        };
        format!(
            "{} \"{}\" {} \"{}\"{}",
            self.white_bold
                .apply_to(format!("{} between left reference", subject)),
            name(&pair.left),
            self.white_bold.apply_to("and right target"),
            name(&pair.right),
            self.white_bold.apply_to(":")
        )
    }

    fn range(&self, section: &AnalysisSection, style: &Style, emphasis: &Style) -> String {
        format!(
            "{}{}{}",
            emphasis.apply_to(self.frame(section.start)),
            style.apply_to(" and "),
            emphasis.apply_to(self.frame(section.end))
        )
    }

    fn candidate_line(&self, candidate: &OffsetCandidate, style: &Style, emphasis: &Style) -> String {
        format!(
            "{} {} with unit variance {:.3}{}\n",
            style.apply_to("*"),
            emphasis.apply_to(format!("{:>4}", Self::offset(candidate.shift))),
            candidate.z_score,
            style.apply_to(".")
        )
    }

    /// Text for one section finding, `None` when the section is aligned.
    pub fn section(&self, section: &AnalysisSection, finding: &SectionFinding) -> Option<String> {
        let mut out = String::new();
        match finding {
            SectionFinding::Aligned => return None,
            SectionFinding::Inconclusive | SectionFinding::WeakSignal { .. } => {
                out.push_str(&format!(
                    "{}{}{}\n",
                    self.red.apply_to(
                        "Could not find a significant relation between left and right clips between "
                    ),
                    self.range(section, &self.red, &self.yellow_bold),
                    self.red.apply_to(".")
                ));
                if let SectionFinding::WeakSignal { candidates } = finding {
                    out.push_str("Timing offsets with high unit variance are:\n");
                    for candidate in candidates {
                        out.push_str(&self.candidate_line(candidate, &self.red, &self.yellow_bold));
                    }
                }
            }
            SectionFinding::SingleCandidate { candidate } => {
                out.push_str(&format!(
                    "{}{}{}{} with unit variance {:.3}{}\n",
                    self.blue.apply_to("Possible "),
                    self.blue_bold.apply_to(Self::offset(candidate.shift)),
                    self.blue.apply_to(" offset between "),
                    self.range(section, &self.blue, &self.blue_bold),
                    candidate.z_score,
                    self.blue.apply_to(".")
                ));
            }
            SectionFinding::Ambiguous { candidates, note } => {
                out.push_str(&format!(
                    "{}{}{}\n",
                    self.blue.apply_to("Multiple possible offsets detected between "),
                    self.range(section, &self.blue, &self.blue_bold),
                    self.blue.apply_to(":")
                ));
                for candidate in candidates {
                    out.push_str(&self.candidate_line(candidate, &self.blue, &self.blue_bold));
                }
                out.push_str(note.text());
                out.push('\n');
            }
        }
        Some(out)
    }

    /// Text for a whole pair report, `None` when nothing needs reporting.
    pub fn report(&self, report: &PairReport) -> Option<String> {
        if report.is_aligned() {
            return None;
        }

        let mut out = String::new();

        if let Some(mismatch) = &report.length_mismatch {
            out.push_str(&format!(
                "{}\n",
                self.yellow.apply_to(format!(
                    "Left and right clips' length differs by more than {} frames.",
                    LENGTH_TOLERANCE
                ))
            ));
            out.push_str(&format!("Left clip has {} frames.\n", mismatch.left_len));
            out.push_str(&format!("Right clip has {} frames.\n", mismatch.right_len));
        }

        match &report.analysis {
            PairAnalysis::Unsupported { usable_len } => {
                out.push_str(&format!(
                    "{}\n",
                    self.red.apply_to(format!(
                        "Comparisons on clips shorter than {} frames are not supported.",
                        MIN_USABLE_LEN
                    ))
                ));
                out.push_str(&format!(
                    "Left clip has {} frames, right clip has {} frames, usable overlap is {}.\n",
                    report.left_len, report.right_len, usable_len
                ));
            }
            PairAnalysis::Sections { sections } => {
                let findings: Vec<String> = sections
                    .iter()
                    .filter_map(|s| self.section(&s.section, &s.finding))
                    .collect();
                if findings.is_empty() {
                    out.push_str(ALIGNED_MESSAGE);
                    out.push('\n');
                } else {
                    out.extend(findings);
                }
            }
        }

        Some(out)
    }
}
