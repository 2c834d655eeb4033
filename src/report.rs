// src/report.rs
//! Read-only text views of a profile for the viewer.

use crate::core::types::{Category, Profile};
use crate::growth::GrowthReport;
use crossterm::style::Stylize;
use std::collections::BTreeMap;
use std::path::Path;

const RULE_WIDTH: usize = 50;
const LABEL_WIDTH: usize = 22;
const KEY_WIDTH: usize = 20;
const VOCAB_COLUMNS: usize = 3;
const VOCAB_COLUMN_WIDTH: usize = 25;

/// Pretty JSON dump of the profile, 2-space indented.
pub fn render_json(profile: &Profile) -> serde_json::Result<String> {
    serde_json::to_string_pretty(profile)
}

/// Renders the text reports. Headings are bolded when `styled` is set, which
/// the viewer does only for a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    styled: bool,
}

impl Renderer {
    pub fn styled(styled: bool) -> Self {
        Self { styled }
    }

    fn heading(&self, out: &mut String, title: &str) {
        out.push('\n');
        if self.styled {
            out.push_str(&format!("{}\n", title.bold()));
        } else {
            out.push_str(title);
            out.push('\n');
        }
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
    }

    pub fn summary(&self, profile: &Profile) -> String {
        let mut out = String::new();
        self.heading(&mut out, "📊 LEARNING SUMMARY");
        for category in Category::ALL {
            let unit = match category {
                Category::TechnicalVocabulary => "terms",
                Category::PhrasePatterns => "patterns",
                _ => "entries",
            };
            out.push_str(&format!(
                "{:<LABEL_WIDTH$}{:4} {}\n",
                format!("{}:", category.label()),
                profile.count(category),
                unit
            ));
        }
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
        out.push_str(&format!("{:<LABEL_WIDTH$}{:4}\n", "Total Learning Items:", profile.total_items()));
        out
    }

    /// Word corrections, capitalizations and phrase patterns, each sorted by
    /// key. Empty sections are left out.
    pub fn corrections(&self, profile: &Profile) -> String {
        let mut out = String::new();
        self.heading(&mut out, "📝 CORRECTIONS");
        let sections: [(&str, &BTreeMap<String, String>); 3] = [
            ("Word Corrections", &profile.word_corrections),
            ("Capitalizations", &profile.capitalizations),
            ("Phrase Patterns", &profile.phrase_patterns),
        ];
        for (title, mapping) in sections {
            if mapping.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{}:\n", title));
            for (from, to) in mapping {
                out.push_str(&format!("  {:<KEY_WIDTH$} → {}\n", from, to));
            }
        }
        out
    }

    /// Sorted vocabulary tiled into fixed-width columns.
    pub fn vocabulary(&self, profile: &Profile) -> String {
        let mut out = String::new();
        self.heading(&mut out, "💻 TECHNICAL VOCABULARY");
        if profile.technical_vocabulary.is_empty() {
            out.push_str("  No vocabulary learned yet\n");
            return out;
        }
        let mut terms: Vec<&str> = profile.technical_vocabulary.iter().map(String::as_str).collect();
        terms.sort_unstable();
        for row in terms.chunks(VOCAB_COLUMNS) {
            out.push_str("  ");
            for term in row {
                out.push_str(&format!("{:<VOCAB_COLUMN_WIDTH$}", term));
            }
            out.push('\n');
        }
        out
    }

    pub fn growth(&self, report: &GrowthReport) -> String {
        let mut out = String::new();
        self.heading(&mut out, "📈 LEARNING GROWTH");

        match &report.previous_run {
            Some(ts) => out.push_str(&format!("New since last run ({}):\n", ts)),
            None => out.push_str("New since tracking began:\n"),
        }
        if report.new_item_count() == 0 {
            out.push_str("  Nothing new\n");
        } else {
            for category in Category::ALL {
                let fresh = report.new_since_last_run.get(category);
                if !fresh.is_empty() {
                    out.push_str(&format!("  {}: {}\n", category.label(), fresh.join(", ")));
                }
            }
        }

        out.push_str("\nAdded in the last 24h / 7d:\n");
        for category in Category::ALL {
            out.push_str(&format!(
                "  {:<LABEL_WIDTH$}{:4} / {:4}\n",
                format!("{}:", category.label()),
                report.added_today.get(category),
                report.added_this_week.get(category)
            ));
        }

        out.push('\n');
        out.push_str(&format!(
            "Growth since tracking began: {:+} items\n",
            report.growth_since_first_tracking
        ));
        out.push_str(&format!("Snapshots recorded: {}\n", report.snapshot_count));
        out.push_str(&format!("State file: {}\n", report.state_path.display()));
        out
    }

    /// Shown instead of the growth section when the profile could not be
    /// parsed and no snapshot was taken.
    pub fn growth_skipped(&self, profile_path: &Path) -> String {
        let mut out = String::new();
        self.heading(&mut out, "📈 LEARNING GROWTH");
        out.push_str(&format!(
            "  Growth tracking skipped: {} could not be read\n",
            profile_path.display()
        ));
        out
    }

    /// Everything at once: what the viewer prints without a mode flag.
    /// `growth` is `None` when tracking was skipped for an unreadable profile.
    pub fn overview(&self, profile: &Profile, growth: Option<&GrowthReport>, profile_path: &Path) -> String {
        let mut out = String::new();
        out.push_str(&self.summary(profile));
        out.push_str(&self.corrections(profile));
        out.push_str(&self.vocabulary(profile));
        match growth {
            Some(report) => out.push_str(&self.growth(report)),
            None => out.push_str(&self.growth_skipped(profile_path)),
        }
        out.push_str(&format!("\n📁 Profile: {}\n", profile_path.display()));
        out.push_str("\nOptions:\n");
        out.push_str("  --json        : Export as formatted JSON\n");
        out.push_str("  --summary     : Show only statistics\n");
        out.push_str("  --corrections : Show only corrections\n");
        out.push_str("  --vocab       : Show only vocabulary\n");
        out.push_str("  --growth      : Show only growth tracking\n");
        out
    }
}
