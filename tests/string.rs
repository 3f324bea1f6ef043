#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        multiline in string is OK
        "one"
        "two"
    }

    tests! {
        no_escapes in string is OK
        "a\\nb"
    }

    tests! {
        unterminated in string is ERR(65)
        "[line 1] Error: Unterminated string"
    }
}
