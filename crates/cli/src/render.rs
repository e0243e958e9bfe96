//! Terminal rendering of simulated runs.

use std::io::Write;

use docflow_core::catalog::{find_compliance, find_industry, find_model, find_region};
use docflow_core::{DeploymentConfig, Icon, ProgressState};
use docflow_progress::ProgressView;

const BAR_WIDTH: usize = 30;

/// Panel shown once a run completes.
pub enum Panel {
    /// Deployment summary echoing the wizard's choices
    Deployment(DeploymentConfig),
    /// Upload confirmation
    Upload,
}

/// Draws a single-line progress bar, then the completion panel.
pub struct TerminalView<W: Write + Send> {
    out: W,
    panel: Panel,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, panel: Panel) -> Self {
        Self { out, panel }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_panel(&mut self) -> std::io::Result<()> {
        match &self.panel {
            Panel::Deployment(config) => {
                writeln!(self.out, "Deployment Successful!")?;
                writeln!(self.out, "Your AI document processing system is live and ready to use.")?;
                writeln!(self.out)?;
                for (field, value) in summary(config) {
                    writeln!(self.out, "  {:<16} {}", field, value)?;
                }
            }
            Panel::Upload => {
                writeln!(self.out, "Documents uploaded and queued for processing.")?;
            }
        }
        Ok(())
    }
}

impl<W: Write + Send> ProgressView for TerminalView<W> {
    fn render_progress(&mut self, state: &ProgressState) {
        let line = progress_line(state);
        // Terminal write failures are not worth aborting a run over.
        let _ = write!(self.out, "\r{}", line).and_then(|_| self.out.flush());
    }

    fn render_complete(&mut self, _state: &ProgressState) {
        let _ = writeln!(self.out);
        let _ = self.write_panel().and_then(|_| self.out.flush());
    }
}

/// `[#####.....]  50%  label`
pub fn progress_line(state: &ProgressState) -> String {
    let filled = usize::from(state.percent) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%  {}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        state.percent,
        state.label
    )
}

/// Glyph drawn next to a catalog entry.
pub fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Scale => "⚖",
        Icon::Heart => "♥",
        Icon::Dollar => "$",
        Icon::Users => "👥",
        Icon::FileText => "📄",
        Icon::Mail => "✉",
        Icon::MessageSquare => "💬",
        Icon::Shield => "🛡",
        Icon::Database => "🗄",
    }
}

/// Field/value rows of the deployment summary.
///
/// Catalog ids are shown by display name; everything else verbatim.
pub fn summary(config: &DeploymentConfig) -> Vec<(&'static str, String)> {
    let name_or_id = |name: Option<&str>, id: &str| name.unwrap_or(id).to_string();

    let mut rows = vec![
        ("Organization", config.organization.clone()),
        (
            "Industry",
            name_or_id(find_industry(&config.industry).ok().map(|i| i.name), &config.industry),
        ),
        ("Use case", config.use_case.clone()),
        (
            "Model",
            name_or_id(find_model(&config.model).ok().map(|m| m.name), &config.model),
        ),
        (
            "Region",
            name_or_id(find_region(&config.region).ok().map(|r| r.name), &config.region),
        ),
        (
            "Compliance",
            name_or_id(
                find_compliance(&config.compliance).ok().map(|c| c.name),
                &config.compliance,
            ),
        ),
    ];
    if !config.team_size.is_empty() {
        rows.push(("Team size", config.team_size.clone()));
    }
    if !config.document_volume.is_empty() {
        rows.push(("Document volume", config.document_volume.clone()));
    }
    rows
}
