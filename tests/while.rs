#[macro_use]
mod common;

#[cfg(test)]
mod _while {
    tests! {
        count in while is OK
        "1"
        "2"
        "3"
    }

    tests! {
        condition_false in while is OK
        "done"
    }
}
