#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        constructor in inheritance is OK
        "value"
    }

    tests! {
        inherit_from_function in inheritance is ERR
        "Superclass must be a class."
        "[line 3]"
    }

    tests! {
        inherit_from_null in inheritance is ERR
        "Superclass must be a class."
        "[line 3]"
    }

    tests! {
        inherit_from_number in inheritance is ERR
        "Superclass must be a class."
        "[line 3]"
    }

    tests! {
        inherit_methods in inheritance is OK
        "foo"
        "bar"
        "bar"
    }

    tests! {
        parenthesized_superclass in inheritance is ERR
        "[line 4] Error at '(': Expect superclass name."
    }

    tests! {
        set_fields_from_base_class in inheritance is OK
        "foo 1"
        "foo 2"
        "bar 1"
        "bar 2"
        "bar 1"
        "bar 2"
    }
}
