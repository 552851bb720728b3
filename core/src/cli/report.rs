use crate::arrange::{ArrangeReport, DatasetSummary};
use std::fmt;

/// Text report formatter for an arranging run
pub struct TextReport<'a> {
    report: &'a ArrangeReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a ArrangeReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.report.summaries {
            write!(f, "{}", DatasetReport::new(summary))?;
            writeln!(f)?;
        }

        if !self.report.failures.is_empty() {
            writeln!(f, "Failed Datasets")?;
            writeln!(f, "---------------")?;
            for (dataset, reason) in &self.report.failures {
                writeln!(f, "{}: {}", dataset, reason)?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "Datasets: {}  Files arranged: {}  Failed: {}",
            self.report.summaries.len(),
            self.report.total(),
            self.report.failures.len()
        )
    }
}

/// Text block for a single dataset
pub struct DatasetReport<'a> {
    summary: &'a DatasetSummary,
}

impl<'a> DatasetReport<'a> {
    pub fn new(summary: &'a DatasetSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for DatasetReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("Dataset: {}", self.summary.dataset);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f, "Rules:           {}", self.summary.rule_set)?;
        writeln!(f, "Files arranged:  {}", self.summary.total)?;
        for (category, count) in &self.summary.counts {
            writeln!(f, "  {:<14} {}", format!("{}:", category), count)?;
        }
        writeln!(f, "Copied:          {}", self.summary.copied)?;
        writeln!(f, "Already present: {}", self.summary.already_present)?;
        writeln!(f, "Skipped:         {}", self.summary.skipped)?;
        if self.summary.failed > 0 {
            writeln!(f, "Copy failures:   {}", self.summary.failed)?;
        }
        if let Some(path) = &self.summary.manifest_path {
            writeln!(f, "Report:          {}", path.display())?;
        }
        Ok(())
    }
}
