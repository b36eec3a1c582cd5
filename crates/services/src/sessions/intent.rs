/// Input from the driver, already mapped from keys or clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Start,
    Select(usize),
    Restart,
    /// Enter key: starts from idle, restarts from the end screen.
    Confirm,
}
