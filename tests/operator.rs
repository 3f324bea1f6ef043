#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        precedence in operator is OK
        "14"
        "20"
        "8"
        "2"
    }

    tests! {
        concat in operator is OK
        "foobar"
        "x"
    }

    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
    }

    tests! {
        equality in operator is OK
        "true"
        "false"
        "true"
        "false"
        "true"
        "false"
        "true"
    }

    tests! {
        negate in operator is OK
        "3"
        "false"
        "true"
        "false"
    }

    tests! {
        divide in operator is OK
        "4"
        "inf"
    }

    tests! {
        add_mixed in operator is ERR(70)
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        subtract_string in operator is ERR(70)
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        compare_mixed in operator is ERR(70)
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        negate_string in operator is ERR(70)
        "Operand must be a number."
        "[line 1]"
    }
}
