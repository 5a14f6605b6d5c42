#[macro_use]
mod common;

#[cfg(test)]
mod array {
    tests! {
        literal_and_index in array is OK
        "1"
        "2"
        "3"
    }

    tests! {
        set_index in array is OK
        "two"
    }

    tests! {
        constructor_fills_nil in array is OK
        "nil"
        "nil"
        "nil"
    }

    tests! {
        length in array is OK
        "4"
    }

    tests! {
        fill in array is OK
        "0"
        "0"
        "0"
    }

    tests! {
        foreach in array is OK
        "0: a"
        "1: b"
        "2: c"
    }

    tests! {
        index_out_of_bounds in array is ERR
        "Array index 5 out of bounds for length 2."
        "[line 2]"
    }

    tests! {
        get_method_index_not_number in array is ERR
        "Array index must be a number, got string."
        "[line 0]"
    }

    tests! {
        fractional_index in array is ERR
        "Invalid array index 1.5."
        "[line 2]"
    }

    tests! {
        negative_index in array is ERR
        "Invalid array index -1."
        "[line 2]"
    }

    tests! {
        constructor_requires_integer in array is ERR
        "Array constructor requires a non-negative integer length, got 2.5."
        "[line 1]"
    }

    tests! {
        constructor_wrong_arity in array is ERR
        "Expected 1 argument but got 2."
        "[line 1]"
    }
}
