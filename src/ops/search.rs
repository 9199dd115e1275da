use regex::Regex;

use crate::model::todo::Todo;

/// Compile a user search pattern, case-insensitive.
/// Patterns that aren't valid regex are matched literally.
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
        .ok()
}

/// IDs of todos whose description matches, in list order
pub fn search_todos<'a>(todos: impl IntoIterator<Item = &'a Todo>, re: &Regex) -> Vec<u64> {
    todos
        .into_iter()
        .filter(|t| re.is_match(&t.description))
        .map(|t| t.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todos() -> Vec<Todo> {
        ["Buy milk", "Buy bread", "Call (mom)"]
            .iter()
            .enumerate()
            .map(|(i, d)| Todo::new(i as u64 + 1, d.to_string()))
            .collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let re = compile_pattern("buy").unwrap();
        assert_eq!(search_todos(&todos(), &re), vec![1, 2]);
    }

    #[test]
    fn test_regex_pattern() {
        let re = compile_pattern("milk|bread").unwrap();
        assert_eq!(search_todos(&todos(), &re), vec![1, 2]);
    }

    #[test]
    fn test_invalid_regex_is_literal() {
        let re = compile_pattern("(mom").unwrap();
        assert_eq!(search_todos(&todos(), &re), vec![3]);
    }

    #[test]
    fn test_empty_pattern() {
        assert!(compile_pattern("").is_none());
    }
}
