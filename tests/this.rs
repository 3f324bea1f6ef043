#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        in_class_method in this is OK
        "Factory"
    }

    tests! {
        outside_class in this is ERR(65)
        "[line 1] Error at 'this': Cannot use 'this' outside of a class"
    }

    tests! {
        in_function in this is ERR(65)
        "[line 2] Error at 'this': Cannot use 'this' outside of a class"
    }
}
