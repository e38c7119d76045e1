//! Terminal rendering for tasks, progress, and badges
//!
//! Handles colored output with a plain fallback for non-TTY streams.

use colored::*;

use ember_core::{BadgeSet, Metrics, Task};

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Time-of-day greeting line
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning 😊"
    } else if hour < 18 {
        "Good Afternoon 🌤️"
    } else {
        "Good Evening 🌙"
    }
}

/// Format a task line for the list view
pub fn format_task(task: &Task, use_color: bool) -> String {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };

    let id_str = if use_color {
        format!("[{}]", task.id).cyan().to_string()
    } else {
        format!("[{}]", task.id)
    };

    let text = if use_color && task.completed {
        task.text.green().to_string()
    } else {
        task.text.clone()
    };

    format!("{} {} {}", checkbox, id_str, text)
}

/// Progress bar with percentage, e.g. `[██████████----------] 50% completed`
pub fn format_progress(percent: u32, use_color: bool) -> String {
    const WIDTH: usize = 20;

    let filled = ((percent as usize * WIDTH) / 100).min(WIDTH);
    let bar = "█".repeat(filled) + &"-".repeat(WIDTH - filled);

    if use_color {
        format!("[{}] {}% completed", bar.green(), percent)
    } else {
        format!("[{}] {}% completed", bar, percent)
    }
}

/// Points and streak line
pub fn format_metrics(metrics: Metrics, use_color: bool) -> String {
    let line = format!("Points: {} | Streak: {}🔥", metrics.points, metrics.streak);
    if use_color {
        line.yellow().to_string()
    } else {
        line
    }
}

/// Badge row, `🏅5 Tasks`-style
pub fn format_badges(badges: &BadgeSet, use_color: bool) -> String {
    if badges.is_empty() {
        return "No badges yet.".to_string();
    }

    badges
        .iter()
        .map(|milestone| {
            let badge = format!("🏅{} Tasks", milestone);
            if use_color {
                badge.bold().to_string()
            } else {
                badge
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Line announcing a freshly earned badge
pub fn format_badge_earned(milestone: u32, use_color: bool) -> String {
    let line = format!("🏅 Badge earned: {} tasks completed!", milestone);
    if use_color {
        line.bright_yellow().bold().to_string()
    } else {
        line
    }
}

/// Celebration line printed when a task is completed
pub fn format_celebration(use_color: bool) -> String {
    let line = "🎉 Task complete!";
    if use_color {
        line.bright_magenta().bold().to_string()
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::TaskId;

    #[test]
    fn test_format_task_open() {
        let task = Task::new(TaskId(1), "Test task");

        let output = format_task(&task, false);
        assert_eq!(output, "[ ] [1] Test task");
    }

    #[test]
    fn test_format_task_completed() {
        let task = Task::new(TaskId(2), "Done task").with_completed(true);

        let output = format_task(&task, false);
        assert_eq!(output, "[✓] [2] Done task");
    }

    #[test]
    fn test_format_progress_half() {
        let output = format_progress(50, false);
        assert_eq!(output, "[██████████----------] 50% completed");
    }

    #[test]
    fn test_format_progress_bounds() {
        assert_eq!(format_progress(0, false), "[--------------------] 0% completed");
        assert_eq!(
            format_progress(100, false),
            "[████████████████████] 100% completed"
        );
    }

    #[test]
    fn test_format_metrics() {
        let metrics = Metrics {
            points: 30,
            streak: 2,
        };
        assert_eq!(format_metrics(metrics, false), "Points: 30 | Streak: 2🔥");
    }

    #[test]
    fn test_format_badges() {
        let mut badges = BadgeSet::new();
        assert_eq!(format_badges(&badges, false), "No badges yet.");

        badges.award(100);
        assert_eq!(format_badges(&badges, false), "🏅5 Tasks  🏅10 Tasks");
    }

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(9), "Good Morning 😊");
        assert_eq!(greeting(13), "Good Afternoon 🌤️");
        assert_eq!(greeting(20), "Good Evening 🌙");
    }
}
