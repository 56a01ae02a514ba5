/// Last path or URL segment with a trailing `.git` removed.
pub fn repo_display_name(location: &str) -> String {
    let trimmed = location.trim().trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\', ':']).next().unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        "repository".to_string()
    } else {
        name.to_string()
    }
}

pub fn short_hash(id: &str) -> String {
    id.chars().take(7).collect()
}

pub fn subject_line(message: &str) -> String {
    message.trim().lines().next().unwrap_or("").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_from_paths_and_urls() {
        assert_eq!(repo_display_name("https://github.com/mdlldz/java.git"), "java");
        assert_eq!(repo_display_name("git@github.com:owner/tool.git"), "tool");
        assert_eq!(repo_display_name("/home/me/work/project/"), "project");
        assert_eq!(repo_display_name("git@host:solo.git"), "solo");
        assert_eq!(repo_display_name(""), "repository");
    }

    #[test]
    fn hash_and_subject() {
        assert_eq!(short_hash("0123456789abcdef"), "0123456");
        assert_eq!(short_hash("abc"), "abc");
        assert_eq!(subject_line("\n  fix: thing  \n\nbody text"), "fix: thing");
        assert_eq!(subject_line(""), "");
    }
}
