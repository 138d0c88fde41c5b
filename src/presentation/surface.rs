//! The listing surface: ordered ids out, indicator toggles in.
//!
//! The controller never touches renderable fragments. It emits
//! instructions through this port and the page's composition root owns the
//! id → fragment mapping, performing the actual show/append/hide work.

/// One instruction toward the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// Detach every fragment from the output region.
    Clear,
    /// Append the fragments for these post ids, in visible-set order.
    Append(Vec<u64>),
    /// Show or hide the "no results" indicator.
    NoResults(bool),
    /// Show or hide the "load more" trigger.
    LoadMore(bool),
}

/// Receiver for the controller's render instructions.
pub trait ListingSurface {
    fn clear(&mut self);
    fn append(&mut self, ids: &[u64]);
    fn set_no_results(&mut self, visible: bool);
    fn set_load_more(&mut self, visible: bool);
}

/// Surface that records commands instead of applying them.
///
/// Composition roots can drain the log and batch-apply it to the page;
/// tests assert on it directly.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: Vec<SurfaceCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Replay the log into the ids currently present in the output region.
    pub fn rendered_ids(&self) -> Vec<u64> {
        let mut ids = Vec::new();
        for command in &self.commands {
            match command {
                SurfaceCommand::Clear => ids.clear(),
                SurfaceCommand::Append(batch) => ids.extend_from_slice(batch),
                _ => {}
            }
        }
        ids
    }

    /// Replayed visibility of the "no results" indicator (hidden initially).
    pub fn no_results_visible(&self) -> bool {
        self.commands
            .iter()
            .rev()
            .find_map(|command| match command {
                SurfaceCommand::NoResults(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Replayed visibility of the "load more" trigger (present in the
    /// initial markup, so visible until the controller says otherwise).
    pub fn load_more_visible(&self) -> bool {
        self.commands
            .iter()
            .rev()
            .find_map(|command| match command {
                SurfaceCommand::LoadMore(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(true)
    }
}

impl ListingSurface for CommandLog {
    fn clear(&mut self) {
        self.commands.push(SurfaceCommand::Clear);
    }

    fn append(&mut self, ids: &[u64]) {
        self.commands.push(SurfaceCommand::Append(ids.to_vec()));
    }

    fn set_no_results(&mut self, visible: bool) {
        self.commands.push(SurfaceCommand::NoResults(visible));
    }

    fn set_load_more(&mut self, visible: bool) {
        self.commands.push(SurfaceCommand::LoadMore(visible));
    }
}
