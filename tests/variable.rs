#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        define_and_print in variable is OK
        "1"
        "nil"
    }

    tests! {
        shadowing in variable is OK
        "local"
        "global"
    }

    tests! {
        redeclare_global in variable is OK
        "2"
    }

    tests! {
        undefined in variable is ERR(70)
        "Undefined variable 'missing'."
        "[line 1]"
    }

    tests! {
        undefined_assign in variable is ERR(70)
        "Undefined variable 'missing'."
        "[line 1]"
    }

    tests! {
        duplicate_local in variable is ERR(65)
        "[line 3] Error at 'a': A variable is already defined with name 'a' in this scope"
    }

    tests! {
        use_in_initializer in variable is ERR(65)
        "[line 3] Error at 'a': Cannot read local variable in its own initializer"
    }

    tests! {
        unused_local in variable is ERR(65)
        "[line 2] Error at 'unused': Local variable is never used"
    }
}
