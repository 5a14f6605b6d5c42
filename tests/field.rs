#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        call_function_field in field is OK
        "bar"
        "1"
        "2"
    }

    tests! {
        call_nonfunction_field in field is ERR
        "Can only call functions and classes, got boolean."
        "[line 8]"
    }

    tests! {
        get_and_set_method in field is OK
        "other"
        "1"
        "method"
        "2"
    }

    tests! {
        get_on_bool in field is ERR
        "Only instances and classes have properties, got boolean."
        "[line 1]"
    }

    tests! {
        get_on_class in field is ERR
        "Undefined property 'bar'"
        "[line 2]"
    }

    tests! {
        get_on_function in field is ERR
        "Only instances and classes have properties, got function."
        "[line 2]"
    }

    tests! {
        get_on_null in field is ERR
        "Only instances and classes have properties, got nil."
        "[line 1]"
    }

    tests! {
        get_on_num in field is ERR
        "[line 1] Error: Trailing '.' in number literal."
    }

    tests! {
        get_on_string in field is ERR
        "Only instances and classes have properties, got string."
        "[line 1]"
    }

    tests! {
        many in field is OK
        "apple"
        "apricot"
        "avocado"
        "banana"
        "bilberry"
    }

    tests! {
        method in field is OK
        "got method"
        "arg"
    }

    tests! {
        method_binds_this in field is OK
        "foo1"
        "1"
    }

    tests! {
        on_instance in field is OK
        "bar value"
        "baz value"
        "bar value"
        "baz value"
    }

    tests! {
        set_evaluation_order in field is ERR
        "Undefined variable 'undefined1'"
        "[line 1]"
    }

    tests! {
        set_on_bool in field is ERR
        "Only instances and classes have fields, got boolean."
        "[line 1]"
    }

    tests! {
        set_on_class in field is OK
        "value"
    }

    tests! {
        set_on_function in field is ERR
        "Only instances and classes have fields, got function."
        "[line 2]"
    }

    tests! {
        set_on_null in field is ERR
        "Only instances and classes have fields, got nil."
        "[line 1]"
    }

    tests! {
        set_on_num in field is ERR
        "[line 1] Error: Trailing '.' in number literal."
    }

    tests! {
        set_on_string in field is ERR
        "Only instances and classes have fields, got string."
        "[line 1]"
    }

    tests! {
        undefined in field is ERR
        "Undefined property 'bar'"
        "[line 4]"
    }
}
