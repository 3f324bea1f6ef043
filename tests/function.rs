#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        define_and_call in function is OK
        "3"
        "<fn add>"
    }

    tests! {
        recursion in function is OK
        "55"
    }

    tests! {
        anonymous in function is OK
        "8"
        "<fn #anon>"
    }

    tests! {
        implicit_nil in function is OK
        "nil"
    }

    tests! {
        parameters_are_local in function is OK
        "hi there"
    }

    tests! {
        arity in function is ERR(70)
        "Expected 2 arguments but got 1."
        "[line 4]"
    }

    tests! {
        not_callable in function is ERR(70)
        "Can only call functions and classes."
        "[line 1]"
    }

    tests! {
        unused_parameter in function is ERR(65)
        "[line 1] Error at 'unused': Local variable is never used"
    }
}
