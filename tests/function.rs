#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        body_must_be_block in function is ERR
        "[line 3] Error at '123': Expect '{' before function body."
    }

    tests! {
        empty_body in function is OK
        "nil"
    }

    tests! {
        extra_arguments in function is ERR
        "Expected 2 arguments but got 4."
        "[line 6]"
    }

    tests! {
        immediately_invoked_function_expression in function is OK
        "10"
    }

    tests! {
        local_mutual_recursion in function is ERR
        "Undefined variable 'isOdd'"
        "[line 4]"
    }

    tests! {
        local_recursion in function is OK
        "21"
    }

    tests! {
        missing_arguments in function is ERR
        "Expected 2 arguments but got 1."
        "[line 3]"
    }

    tests! {
        missing_comma_in_parameters in function is ERR
        "[line 2] Error at 'c': Expect ')' after parameters."
    }

    tests! {
        mutual_recursion in function is OK
        "true"
        "true"
    }

    tests! {
        nested_call_with_arguments in function is OK
        "hello world"
    }

    tests! {
        parameters in function is OK
        "0"
        "1"
        "3"
        "6"
        "10"
        "15"
        "21"
        "28"
        "36"
    }

    tests! {
        print in function is OK
        "<fn foo>"
        "<native fn>"
    }

    tests! {
        recursion in function is OK
        "21"
    }

    tests! {
        too_many_arguments in function is ERR
        "[line 2] Error at 'a': Can't have more than 255 arguments."
    }

    tests! {
        too_many_parameters in function is ERR
        "[line 1] Error at 'a255': Can't have more than 255 parameters."
    }
}
