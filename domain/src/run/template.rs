//! Argument templates
//!
//! Templates use two placeholders, `{target}` and `{module}`. There is no
//! escaping, and any other `{...}` token is passed through untouched.

use super::context::RunContext;

pub const TARGET_PLACEHOLDER: &str = "{target}";
pub const MODULE_PLACEHOLDER: &str = "{module}";

/// Replace every `{target}` and `{module}` in `template`.
///
/// Substituted values are not rescanned, so a target that itself contains
/// `{module}` is inserted literally.
pub fn substitute(template: &str, ctx: &RunContext) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(TARGET_PLACEHOLDER) {
            output.push_str(&ctx.target);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(MODULE_PLACEHOLDER) {
            output.push_str(&ctx.module);
            rest = after;
        } else {
            output.push('{');
            rest = &tail[1..];
        }
    }
    output.push_str(rest);

    output
}

/// Split a substituted argument string on runs of whitespace.
///
/// Quoting is not supported: a value containing spaces always becomes
/// several arguments.
pub fn tokenize_args(args: &str) -> Vec<String> {
    args.split_whitespace().map(str::to_string).collect()
}
