#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        method_lookup in inheritance is OK
        "A"
    }

    tests! {
        method_override in inheritance is OK
        "B"
    }

    tests! {
        chain in inheritance is OK
        "A"
    }
}
