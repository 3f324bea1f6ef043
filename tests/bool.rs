#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        truthiness in bool is OK
        "nil falsy"
        "zero truthy"
        "empty truthy"
    }
}
