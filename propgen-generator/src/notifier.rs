use std::path::Path;

/// Collaborator told about every file the generator rewrites.
///
/// Host build systems use this to invalidate whatever they cached for `path`.
pub trait BuildNotifier {
    fn refresh(&self, path: &Path);
}

/// Notifier that ignores every refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl BuildNotifier for NoopNotifier {
    fn refresh(&self, _path: &Path) {}
}

impl<F> BuildNotifier for F
where
    F: Fn(&Path),
{
    fn refresh(&self, path: &Path) {
        self(path)
    }
}
