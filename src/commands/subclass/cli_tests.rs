//! CLI parsing tests for subclass command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_required_arg_test! {
        command: "subclass",
        test_name: test_requires_class,
        required_arg: "<CLASS>",
    }

    crate::cli_option_test! {
        command: "subclass",
        variant: Subclass,
        test_name: test_with_class,
        args: ["Manager", "Employee"],
        field: class,
        expected: "Manager",
    }

    crate::cli_option_test! {
        command: "subclass",
        variant: Subclass,
        test_name: test_with_ancestor,
        args: ["Manager", "Employee"],
        field: ancestor,
        expected: "Employee",
    }

    crate::cli_error_test! {
        command: "subclass",
        test_name: test_requires_ancestor,
        args: ["Manager"],
    }
}
