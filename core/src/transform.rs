//! Payload transforms applied to a forwarded todo list.

/// Todos in ascending lexicographic order.
pub fn sorted(mut todos: Vec<String>) -> Vec<String> {
    todos.sort();
    todos
}

/// Number of todos in the list.
pub fn count(todos: &[String]) -> usize {
    todos.len()
}
