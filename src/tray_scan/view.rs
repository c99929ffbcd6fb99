use crate::category::Category;
use crate::device_display::interface::ScreenText;
use crate::image_classifier::interface::ClassifiedItem;
use crate::tray_scan::core::{CameraStatus, Flight, Model, ResultsScreen, ScanScreen, Screen};

pub fn screen_for(model: &Model) -> ScreenText {
    match &model.screen {
        Screen::Home => home_screen(),
        Screen::Scan(scan) => scan_screen(scan),
        Screen::Results(results) => results_screen(results),
        Screen::Exited => ScreenText::new("Tray Scan", vec!["Goodbye.".to_string()]),
    }
}

fn home_screen() -> ScreenText {
    let mut lines = vec![
        "Photograph your tray and every item gets a bin.".to_string(),
        String::new(),
    ];
    for category in Category::ALL {
        lines.push(format!(
            "  {}  {} ({})",
            category.icon().glyph(),
            category.label(),
            category.color_token()
        ));
    }
    lines.push(String::new());
    lines.push("[s] scan a tray   [q] quit".to_string());
    ScreenText::new("Tray Scan", lines)
}

fn scan_screen(scan: &ScanScreen) -> ScreenText {
    let mut lines = Vec::new();
    match &scan.camera {
        CameraStatus::Starting => {
            lines.push(format!("Starting the {} camera...", scan.facing.label()));
        }
        CameraStatus::Ready => {
            lines.push(format!("Camera ready ({} facing).", scan.facing.label()));
            lines.push("Line the tray up so every item is visible.".to_string());
        }
        CameraStatus::Failed { message } => {
            lines.push(format!("! {}", message));
        }
    }

    match &scan.flight {
        Flight::Idle => {}
        Flight::Submitting { started_at, .. } => {
            lines.push(String::new());
            lines.push(format!(
                "Analyzing your tray items... ({}s)",
                started_at.elapsed().as_secs()
            ));
        }
        Flight::Failed { message, .. } => {
            lines.push(String::new());
            lines.push(format!("! {}", message));
        }
    }

    let hints = match (&scan.camera, &scan.flight) {
        // No capture hint while a request is in flight
        (CameraStatus::Ready, Flight::Submitting { .. }) => "[t] flip camera   [b] back   [q] quit",
        (CameraStatus::Ready, _) => "[space] capture   [t] flip camera   [b] back   [q] quit",
        (CameraStatus::Failed { .. }, _) => "[r] retry camera   [b] back   [q] quit",
        (CameraStatus::Starting, _) => "[b] back   [q] quit",
    };
    lines.push(String::new());
    lines.push(hints.to_string());
    ScreenText::new("Scan", lines)
}

fn results_screen(results: &ResultsScreen) -> ScreenText {
    let outcome = &results.outcome;
    let mut lines = Vec::new();
    lines.push(match outcome.items.len() {
        1 => "1 item identified".to_string(),
        n => format!("{} items identified", n),
    });

    if let Some(summary) = &outcome.summary {
        lines.push(String::new());
        lines.push(format!("Classifier note: {}", summary));
    }

    if outcome.items.is_empty() && outcome.summary.is_none() {
        lines.push(String::new());
        lines.push("No recognizable items. Try again with more light.".to_string());
    }

    if !outcome.items.is_empty() {
        lines.push(String::new());
        for item in &outcome.items {
            lines.push(format!(
                "  {}  {} - {} - {}% confidence",
                item.category.icon().glyph(),
                item.name,
                item.category.label(),
                confidence_percent(item.confidence)
            ));
        }

        lines.push(String::new());
        lines.push("By category:".to_string());
        for (category, members) in group_by_category(&outcome.items) {
            let names: Vec<&str> = members.iter().map(|item| item.name.as_str()).collect();
            lines.push(format!(
                "  {}  {} ({}): {}",
                category.icon().glyph(),
                category.label(),
                members.len(),
                names.join(", ")
            ));
        }

        lines.push(String::new());
        lines.push(diversion_line(&outcome.items));
    }

    if let Some(annotated) = &outcome.annotated {
        lines.push(format!(
            "Annotated image received ({}x{}).",
            annotated.width, annotated.height
        ));
    }

    lines.push(String::new());
    lines.push("[s] scan again   [h] home   [q] quit".to_string());
    ScreenText::new("Results", lines)
}

/// Integer percent, rounded to nearest. Rounding is away from zero at the
/// midpoint, so 0.005 reads as 1%, never 0%.
pub fn confidence_percent(confidence: f32) -> u32 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Groups items by category, keyed in first-seen order. Members keep the
/// classifier's order; the input list is never reordered or copied.
pub fn group_by_category(items: &[ClassifiedItem]) -> Vec<(Category, Vec<&ClassifiedItem>)> {
    let mut groups: Vec<(Category, Vec<&ClassifiedItem>)> = Vec::new();
    for item in items {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == item.category)
        {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category, vec![item])),
        }
    }
    groups
}

fn diversion_line(items: &[ClassifiedItem]) -> String {
    let diverted = items
        .iter()
        .filter(|item| item.category.diverts_from_landfill())
        .count();
    format!("{} of {} items stay out of the landfill.", diverted, items.len())
}
