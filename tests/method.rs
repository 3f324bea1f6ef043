#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        bind_this in method is OK
        "hi ada"
    }

    tests! {
        call_other_method in method is OK
        "hi you"
    }

    tests! {
        undefined_method in method is ERR(70)
        "Undefined property 'bar'."
        "[line 2]"
    }
}
