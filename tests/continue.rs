#[macro_use]
mod common;

#[cfg(test)]
mod _continue {
    tests! {
        inside_while in continue is OK
        "1"
        "3"
        "4"
        "5"
    }

    tests! {
        inside_for in continue is OK
        "0"
        "2"
        "3"
    }

    tests! {
        no_loop in continue is ERR(65)
        "[line 1] Error at 'continue': Cannot use 'continue' outside of a loop"
    }
}
