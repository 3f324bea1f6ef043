#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        empty in class is OK
        "Foo"
    }

    tests! {
        reference_self in class is OK
        "Foo"
    }

    tests! {
        instance_display in class is OK
        "Foo instance"
    }

    tests! {
        class_method in class is OK
        "9"
    }

    tests! {
        class_method_inherited in class is OK
        "made"
    }

    tests! {
        static_field in class is OK
        "1"
    }

    tests! {
        inherit_self in class is ERR(65)
        "[line 1] Error at 'Foo': A class cannot inherit from itself"
    }

    tests! {
        superclass_not_class in class is ERR(70)
        "Superclass must be a class."
        "[line 2]"
    }
}
