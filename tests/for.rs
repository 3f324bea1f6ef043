#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        count in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        continue_increments in for is OK
        "3"
        "4"
    }

    tests! {
        no_clauses in for is OK
        "0"
        "1"
    }

    tests! {
        initializer_is_local in for is ERR(70)
        "Undefined variable 'i'."
        "[line 2]"
    }
}
