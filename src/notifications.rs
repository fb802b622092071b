/// Cross-platform notification support
/// Currently only implements macOS notifications
use crate::engine::TimerEvent;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Present an engine event to the user
pub fn notify_event(event: &TimerEvent) {
    match event {
        TimerEvent::Alert {
            name,
            alert_percentage,
            ..
        } => notify_alert(name, *alert_percentage),
        TimerEvent::Completed { name, .. } => notify_completed(name),
    }
}

/// Send a notification when a timer crosses its alert percentage
pub fn notify_alert(timer_name: &str, alert_percentage: u8) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{} has completed {}% of its duration" with title "Multitimer - Progress Alert""#,
            timer_name.replace('"', "\\\""),
            alert_percentage
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = (timer_name, alert_percentage);
    }
}

/// Send a notification when a timer completes
pub fn notify_completed(timer_name: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "⏰ {} is done" with title "Multitimer - Timer Completed""#,
            timer_name.replace('"', "\\\"")
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = timer_name;
    }
}
