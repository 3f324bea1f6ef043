#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_args in constructor is OK
        "1"
        "2"
    }

    tests! {
        returns_instance in constructor is OK
        "C instance"
    }

    tests! {
        direct_init_call in constructor is OK
        "C instance"
    }

    tests! {
        inherited_init in constructor is OK
        "x"
    }

    tests! {
        default_arity in constructor is ERR(70)
        "Expected 0 arguments but got 1."
        "[line 2]"
    }

    tests! {
        init_arity in constructor is ERR(70)
        "Expected 1 arguments but got 0."
        "[line 6]"
    }
}
