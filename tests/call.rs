#[macro_use]
mod common;

#[cfg(test)]
mod call {
    tests! {
        bool in call is ERR
        "Can only call functions and classes, got boolean."
        "[line 1]"
    }

    tests! {
        null in call is ERR
        "Can only call functions and classes, got nil."
        "[line 1]"
    }

    tests! {
        num in call is ERR
        "Can only call functions and classes, got number."
        "[line 1]"
    }

    tests! {
        object in call is ERR
        "Can only call functions and classes, got instance."
        "[line 3]"
    }

    tests! {
        string in call is ERR
        "Can only call functions and classes, got string."
        "[line 1]"
    }
}
