#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add in operator is OK
        "0"
        "579"
        "string"
        "num5"
    }

    tests! {
        add_type_error in operator is ERR
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        comparison in operator is OK
        "true"
        "false"
        "false"
        "true"
        "true"
        "false"
        "false"
        "false"
        "true"
        "false"
        "true"
        "true"
    }

    tests! {
        comparison_type_error in operator is ERR
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        divide in operator is OK
        "4"
        "1"
        "inf"
    }

    tests! {
        divide_type_error in operator is ERR
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        equals in operator is OK
        "true"
        "true"
        "false"
        "true"
        "false"
        "true"
        "false"
    }

    tests! {
        equals_uninitialized in operator is OK
        "true"
        "true"
    }

    tests! {
        equals_class in operator is OK
        "true"
        "false"
        "false"
        "true"
    }

    tests! {
        equals_method in operator is OK
        "true"
    }

    tests! {
        multiply in operator is OK
        "15"
        "3.702"
        "0"
    }

    tests! {
        multiply_type_error in operator is ERR
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        negate in operator is OK
        "-3"
        "3"
        "-3"
    }

    tests! {
        negate_type_error in operator is ERR
        "Operand must be a number, got string."
        "[line 1]"
    }

    tests! {
        not in operator is OK
        "false"
        "true"
        "true"
        "true"
    }

    tests! {
        not_equals in operator is OK
        "false"
        "false"
        "true"
        "false"
        "true"
        "false"
        "true"
    }

    tests! {
        subtract in operator is OK
        "1"
        "0"
        "-4"
        "7"
    }
}
