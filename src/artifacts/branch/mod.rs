//! Branch and ref naming

pub mod branch_name;

/// Ref-name rules: no leading dot or slash, no `/.`, `..`, trailing slash,
/// `.lock` suffix, `@{`, control characters, spaces or `*:?[\~^`.
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Content of a symbolic ref file, e.g. `ref: refs/heads/main`
pub const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Branch HEAD points at in a fresh repository, and the literal target
/// written into every new branch file.
pub const DEFAULT_BRANCH: &str = "main";

pub const HEAD_REF_NAME: &str = "HEAD";
