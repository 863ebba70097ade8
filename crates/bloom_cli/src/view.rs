//! Plain-text rendering of the task page.

use bloom_core::model::{Task, TaskCounts};
use tabled::settings::Style;
use tabled::{Table, Tabled};

const TITLE: &str = "Bloom";
const SUBTITLE: &str = "Your AI-Powered Productivity Companion";
const EMPTY_TITLE: &str = "Start your productive day!";
const EMPTY_SUBTITLE: &str = "Add your first task above";

/// Display theme. Lives only as long as the session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn plain() -> Self {
        Self {
            accent: "",
            muted: "",
            reset: "",
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: "\x1b[38;5;62m",
                muted: "\x1b[38;5;245m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                accent: "\x1b[38;5;213m",
                muted: "\x1b[38;5;250m",
                reset: "\x1b[0m",
            },
        }
    }

    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}

/// Read-only projection of the session handed to the renderer.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub tasks: &'a [Task],
    pub counts: TaskCounts,
    pub banner: Option<&'a str>,
    pub ambient: &'a str,
    pub theme: Theme,
}

#[derive(Tabled)]
struct CountsRow {
    #[tabled(rename = "Active")]
    active: usize,
    #[tabled(rename = "Completed")]
    completed: usize,
    #[tabled(rename = "Total")]
    total: usize,
}

pub fn render_counts(counts: TaskCounts) -> String {
    let row = CountsRow {
        active: counts.active,
        completed: counts.completed,
        total: counts.total,
    };
    Table::new([row]).with(Style::rounded()).to_string()
}

pub fn render_task_line(task: &Task, palette: &Palette) -> String {
    if task.completed {
        palette.mutedize(&format!("[x] {}  ({})", task.text, task.id))
    } else {
        format!("[ ] {}  ({})", task.text, palette.mutedize(&task.id))
    }
}

pub fn render_page(view: &PageView<'_>, palette: &Palette) -> String {
    let mut lines = vec![
        format!("✨ {} · {}", palette.accentize(TITLE), view.theme.label()),
        palette.mutedize(SUBTITLE),
        String::new(),
    ];

    if let Some(banner) = view.banner {
        lines.push(format!("✨ {}", palette.accentize(banner)));
    }
    lines.push(format!("♥ {}", view.ambient));
    lines.push(String::new());

    lines.push(render_counts(view.counts));
    lines.push(String::new());

    if view.tasks.is_empty() {
        lines.push(palette.accentize(EMPTY_TITLE));
        lines.push(palette.mutedize(EMPTY_SUBTITLE));
    } else {
        lines.extend(view.tasks.iter().map(|task| render_task_line(task, palette)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
