/// Resource names accepted by the `name=soft[:hard]` flag grammar, one per
/// setrlimit(2) resource the container runtime knows how to apply.
pub const RESOURCE_NAMES: [&str; 15] = [
    "core",
    "cpu",
    "data",
    "fsize",
    "locks",
    "memlock",
    "msgqueue",
    "nice",
    "nofile",
    "nproc",
    "rss",
    "rtprio",
    "rttime",
    "sigpending",
    "stack",
];

/// Returns true when `name` is a resource the runtime understands.
pub fn is_known(name: &str) -> bool {
    RESOURCE_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert!(is_known("nofile"));
        assert!(is_known("nproc"));
        assert!(is_known("rttime"));
    }

    #[test]
    fn unknown_names() {
        assert!(!is_known("NOFILE"));
        assert!(!is_known("files"));
        assert!(!is_known(""));
    }
}
