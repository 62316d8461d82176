//! Trial programs fed to the compiler on stdin.

/// Headers every type check sees.
pub const PRELUDE: &str = "\
#include <sys/types.h>
#ifdef _WIN32
#include <inttypes.h>
#endif
#include <stdarg.h>
#include <stdbool.h>
#include <stdint.h>
#include <stdio.h>
#include <unistd.h>
";

/// Compiles only if `name` is a complete type.
pub fn type_exists(name: &str) -> String {
    format!(
        "{PRELUDE}\
int main(void) {{
    if (({name} *) 0)
        return 0;
    if (sizeof ({name}))
        return 0;
    return 0;
}}
"
    )
}

/// Compiles only if `sizeof(name) == size`.
pub fn type_size_is(name: &str, size: usize) -> String {
    format!(
        "{PRELUDE}\
typedef char ccprobe_size_check[(sizeof({name}) == {size}) ? 1 : -1];
int main(void) {{
    return (int) sizeof(ccprobe_size_check) - 1;
}}
"
    )
}

/// Compiles only if `header` can be included.
pub fn header(header: &str) -> String {
    format!(
        "#include <{header}>
int main(void) {{
    return 0;
}}
"
    )
}

/// Links only if every library on the command line resolves.
pub fn empty_main() -> String {
    "int main(void) {\n    return 0;\n}\n".to_string()
}

/// Links only if `name` resolves to a real (non-stub) function.
///
/// The prototype is deliberately wrong so no header is needed; only the
/// symbol matters.
pub fn function(name: &str) -> String {
    format!(
        "#include <limits.h>
#if defined(__stub_{name}) || defined(__stub___{name})
#error \"{name} is a stub\"
#endif
#ifdef __cplusplus
extern \"C\"
#endif
char {name}(void);
int main(void) {{
    return (int) {name}();
}}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_programs_use_prelude() {
        let src = type_exists("pid_t");
        assert!(src.starts_with(PRELUDE));
        assert!(src.contains("((pid_t *) 0)"));

        let src = type_size_is("time_t", 8);
        assert!(src.starts_with(PRELUDE));
        assert!(src.contains("(sizeof(time_t) == 8) ? 1 : -1"));
    }

    #[test]
    fn test_function_program() {
        let src = function("fallocate");
        assert!(src.contains("char fallocate(void);"));
        assert!(src.contains("__stub_fallocate"));
        assert!(src.contains("return (int) fallocate();"));
    }

    #[test]
    fn test_header_program() {
        assert!(header("x86intrin.h").starts_with("#include <x86intrin.h>\n"));
    }
}
