//! Include-directive expansion for template source text.
//!
//! An include directive is `${include <path>}` where `<path>` is a
//! whitespace-free token resolved relative to the template file's directory.
//! Resolution runs before placeholder tokenization: the directive is replaced
//! by the literal content of the referenced file, so included files may
//! themselves contain placeholders (discovered by the parser afterward) or
//! further include directives (picked up by the repeated scan here).
//!
//! The scan always restarts from the top of the text and substitutes the
//! *first* remaining directive, looping until none are left. There is no
//! cycle detection and no recursion-depth limit: a circular include (A
//! includes B includes A) will loop until the process runs out of memory.
//! Template authors control the files involved, so this is documented as a
//! hazard rather than guarded against.

use std::path::Path;

use tokio::fs;

use crate::error::TemplateError;
use crate::parser::skip_whitespace;

/// Expand every include directive in `text`, reading referenced files
/// relative to `dir`.
///
/// Each substitution suspends on the file read before the scan resumes, so
/// an include's own includes are fully resolved before later siblings.
///
/// # Errors
///
/// Returns [`TemplateError::Load`] naming the included file if it cannot be
/// read; the whole load is aborted.
pub(crate) async fn resolve_includes(
    source: String,
    dir: &Path,
) -> Result<String, TemplateError> {
    let mut text = source;

    loop {
        let (range, target) = match find_include(&text) {
            Some((start, end, rel)) => (start..end, dir.join(rel)),
            None => break,
        };

        tracing::debug!("expanding include directive -> {}", target.display());

        let content = fs::read_to_string(&target).await.map_err(|source| {
            TemplateError::Load {
                path: target.clone(),
                source,
            }
        })?;

        text.replace_range(range, &content);
    }

    Ok(text)
}

/// Locate the first include directive in `text`.
///
/// Returns the directive's byte range and the path token inside it.
fn find_include(text: &str) -> Option<(usize, usize, &str)> {
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find("${") {
        let start = cursor + found;
        if let Some((end, path)) = match_include_at(text, start) {
            return Some((start, end, path));
        }
        cursor = start + 1;
    }
    None
}

/// Try to match an include directive whose `${` begins at byte offset `start`.
fn match_include_at(text: &str, start: usize) -> Option<(usize, &str)> {
    let mut i = skip_whitespace(text, start + 2);

    let after_keyword = i.checked_add("include".len())?;
    if text.get(i..after_keyword)? != "include" {
        return None;
    }

    // At least one whitespace character must separate the keyword from the
    // path, otherwise this is an ordinary placeholder (e.g. `${includes}`).
    i = skip_whitespace(text, after_keyword);
    if i == after_keyword {
        return None;
    }

    let path_start = i;
    while let Some(c) = text[i..].chars().next() {
        if c.is_whitespace() || c == '}' {
            break;
        }
        i += c.len_utf8();
    }
    if i == path_start {
        return None;
    }
    let path_end = i;

    i = skip_whitespace(text, i);
    if text.as_bytes().get(i) == Some(&b'}') {
        Some((i + 1, &text[path_start..path_end]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    async fn write(dir: &Path, name: &str, content: &str) -> Result<()> {
        fs::write(dir.join(name), content).await?;
        Ok(())
    }

    #[tokio::test]
    async fn substitutes_included_file_content() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "other.txt", "Z").await?;

        let resolved =
            resolve_includes("before ${include other.txt} after".into(), dir.path()).await?;
        assert_eq!(resolved, "before Z after");
        Ok(())
    }

    #[tokio::test]
    async fn nested_includes_are_fully_resolved() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "outer.txt", "[${include inner.txt}]").await?;
        write(dir.path(), "inner.txt", "core").await?;

        let resolved = resolve_includes("${include outer.txt}".into(), dir.path()).await?;
        assert_eq!(resolved, "[core]");
        Ok(())
    }

    #[tokio::test]
    async fn sibling_includes_resolve_in_document_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "a.txt", "A").await?;
        write(dir.path(), "b.txt", "B").await?;

        let resolved =
            resolve_includes("${include a.txt}-${include b.txt}".into(), dir.path()).await?;
        assert_eq!(resolved, "A-B");
        Ok(())
    }

    #[tokio::test]
    async fn included_placeholders_survive_resolution() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "fragment.txt", "<style>${css}</style>").await?;

        let resolved = resolve_includes("${include fragment.txt}".into(), dir.path()).await?;
        assert_eq!(resolved, "<style>${css}</style>");
        Ok(())
    }

    #[tokio::test]
    async fn whitespace_around_directive_parts_is_tolerated() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "other.txt", "Z").await?;

        let resolved =
            resolve_includes("${  include   other.txt  }".into(), dir.path()).await?;
        assert_eq!(resolved, "Z");
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_aborts_with_load_error() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let err = resolve_includes("${include absent.txt}".into(), dir.path())
            .await
            .unwrap_err();
        match err {
            TemplateError::Load { path, .. } => {
                assert!(path.ends_with("absent.txt"), "got path {}", path.display());
            }
            other => panic!("expected Load error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn bare_include_without_path_is_not_a_directive() -> Result<()> {
        let dir = tempfile::tempdir()?;

        // `${include}` has no path token, so it is left for the placeholder
        // parser to treat as a slot named `include`.
        let resolved = resolve_includes("${include}".into(), dir.path()).await?;
        assert_eq!(resolved, "${include}");
        Ok(())
    }

    #[tokio::test]
    async fn keyword_prefix_of_a_longer_word_is_not_a_directive() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let resolved = resolve_includes("${includes}".into(), dir.path()).await?;
        assert_eq!(resolved, "${includes}");
        Ok(())
    }

    #[tokio::test]
    async fn plain_text_passes_through_untouched() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let resolved = resolve_includes("no directives here".into(), dir.path()).await?;
        assert_eq!(resolved, "no directives here");
        Ok(())
    }
}
