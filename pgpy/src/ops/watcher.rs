//! Regenerating on schema changes.

use std::{path::Path, sync::mpsc, time::Duration};

use eyre::{Context, Result};
use notify_debouncer_full::{
    DebounceEventResult, new_debouncer,
    notify::{EventKind, RecursiveMode},
};
use tracing::{info, warn};

/// Quiet period before a batch of file events triggers a run.
pub const WATCH_DEBOUNCE: Duration = Duration::from_secs(1);

/// Whether an event should trigger regeneration.
fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Watch `input` recursively and call `on_change` after each debounced batch
/// of changes.
///
/// Blocks until the watcher shuts down. `on_change` errors stop the watch;
/// callers that want to keep watching should handle them inside the closure.
pub fn watch(input: &Path, mut on_change: impl FnMut() -> Result<()>) -> Result<()> {
    let (sender, receiver) = mpsc::channel();

    let mut debouncer = new_debouncer(WATCH_DEBOUNCE, None, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                if events.iter().any(|event| is_relevant(&event.kind)) {
                    sender.send(()).ok();
                }
            }
            Err(errors) => {
                for error in errors {
                    warn!(%error, "file watch error");
                }
            }
        }
    })
    .wrap_err("failed to start the file watcher")?;

    debouncer
        .watch(input, RecursiveMode::Recursive)
        .wrap_err_with(|| format!("failed to watch {}", input.display()))?;
    info!(dir = %input.display(), "watching for changes");

    for () in receiver {
        info!("change detected, regenerating");
        on_change()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use notify_debouncer_full::notify::event::{AccessKind, CreateKind, ModifyKind};

    use super::*;

    #[test]
    fn test_relevant_events() {
        assert!(is_relevant(&EventKind::Create(CreateKind::File)));
        assert!(is_relevant(&EventKind::Modify(ModifyKind::Any)));
        assert!(!is_relevant(&EventKind::Access(AccessKind::Any)));
    }
}
