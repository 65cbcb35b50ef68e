//! Custom MiniJinja filters for module layout

use crate::util;
use minijinja::Environment;

/// Register all custom filters with the environment
pub fn register_filters(env: &mut Environment<'_>) {
    env.add_filter("py_string", py_string);
}

/// Quote as a Python string literal
fn py_string(value: &str) -> String {
    util::py_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_filters_in_templates() {
        let mut env = Environment::new();
        register_filters(&mut env);
        let out = env
            .render_str(
                "__all__ = [{{ name | py_string }}]",
                context! { name => "say \"hi\"" },
            )
            .unwrap();
        assert_eq!(out, "__all__ = [\"say \\\"hi\\\"\"]");
    }
}
