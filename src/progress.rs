use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Create a progress bar with the given length and label.
///
/// When `visible` is false the bar still counts but never draws.
pub fn create_progress_bar(len: u64, label: &str, visible: bool) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if !visible {
        pb.set_draw_target(ProgressDrawTarget::hidden());
        return pb;
    }

    let template = format!(
        "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
        label
    );
    match ProgressStyle::default_bar().template(&template) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => log::debug!("Falling back to default progress style: {}", e),
    }
    pb
}
