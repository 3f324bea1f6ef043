#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        returns_operand in logical_operator is OK
        "left"
        "right"
        "nil"
        "2"
    }

    tests! {
        short_circuit in logical_operator is OK
        "false"
        "false"
        "true"
    }
}
