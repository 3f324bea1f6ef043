#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        get_set in field is OK
        "42"
    }

    tests! {
        fields_shadow_methods in field is OK
        "method"
        "field"
    }

    tests! {
        undefined in field is ERR(70)
        "Undefined property 'missing'."
        "[line 2]"
    }

    tests! {
        on_number in field is ERR(70)
        "Only instances have properties."
        "[line 2]"
    }

    tests! {
        set_on_number in field is ERR(70)
        "Only instances have fields."
        "[line 2]"
    }
}
