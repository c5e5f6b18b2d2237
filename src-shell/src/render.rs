//! Text rendering of the window

use lipton_core::ShellSnapshot;

/// Draw one frame: tab strip, address bar, status line and, when shown,
/// the inspection panel.
pub fn frame(snapshot: &ShellSnapshot) -> String {
    let mut out = Vec::new();

    out.push(format!("[ {} ]", snapshot.window_title));

    let strip = snapshot
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let marker = if tab.active { "*" } else { " " };
            let busy = if tab.load_state.is_loading() { " ~" } else { "" };
            format!("{}{}: {}{}", marker, i + 1, tab.label, busy)
        })
        .collect::<Vec<_>>()
        .join(" | ");
    out.push(strip);

    out.push(format!("Address: {}", snapshot.address));

    if let Some(status) = &snapshot.status {
        out.push(format!("Status: {}", status));
    }

    let inspector = &snapshot.inspector;
    if inspector.visible {
        let waiting = if inspector.pending > 0 { " (waiting)" } else { "" };
        out.push(format!("--- Developer Tools ({}){} ---", inspector.tool, waiting));
        if let Some(heading) = &inspector.output.heading {
            out.push(heading.clone());
        }
        out.extend(inspector.output.lines.iter().cloned());
    }

    out.join("\n")
}
