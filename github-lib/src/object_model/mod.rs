mod issue;
mod label;

pub use self::issue::{Issue, PullRequestLinks};
pub use self::label::{Label, NewLabel};
