check! {
  call_returns_a_value,
  r#"
    function f(x: int): int
    Begin
        return x*x
    End

    Algo
        y: int
    Begin
        y <-- f(5)
        print y
    End
  "#,
  "25\n"
}

check! {
  arguments_are_evaluated_in_order,
  r#"
    function sub(a: int, b: int): int
    Begin
        return a - b
    End

    Algo
    Begin
        print sub(10, 4)
    End
  "#,
  "6\n"
}

check! {
  function_with_local_declarations,
  r#"
    function double_sum(a: int, b: int): int
        total: int
    Begin
        total <-- a + b
        return total * 2
    End

    Algo
    Begin
        print double_sum(1, 2)
    End
  "#,
  "6\n"
}

check! {
  parameters_shadow_globals_without_leaking,
  r#"
    function bump(x: int): int
    Begin
        x <-- x + 1
        return x
    End

    Algo
        x: int
    Begin
        x <-- 10
        print bump(1)
        print x
    End
  "#,
  "2\n10\n"
}

check! {
  recursion,
  r#"
    function fact(n: int): int
    Begin
        if n <= 1 then
            return 1
        return n * fact(n - 1)
    End

    Algo
    Begin
        print fact(5)
    End
  "#,
  "120\n"
}

check! {
  function_without_return_yields_null,
  r#"
    function shout(s: str)
    Begin
        print s
    End

    Algo
        v: int
    Begin
        v <-- shout("hey")
        print v
    End
  "#,
  "hey\n0\n"
}

check! {
  return_without_value_yields_null,
  r#"
    function nothing(): int
    Begin
        return
    End

    Algo
    Begin
        print nothing()
    End
  "#,
  "0\n"
}

check! {
  functions_can_read_globals,
  r#"
    function read_g(): int
    Begin
        return g
    End

    Algo
        g: int
    Begin
        g <-- 7
        print read_g()
    End
  "#,
  "7\n"
}

check_error! {
  too_many_arguments,
  r#"
    function f(x: int): int
    Begin
        return x
    End

    Algo
    Begin
        print f(1, 2)
    End
  "#,
  "1 too many arguments passed into 'f'"
}

check_error! {
  too_few_arguments,
  r#"
    function f(x: int, y: int): int
    Begin
        return x
    End

    Algo
    Begin
        print f(1)
    End
  "#,
  "1 too few arguments passed into 'f'"
}

check_error! {
  assigning_an_undeclared_name_in_a_function,
  r#"
    function f(x: int): int
    Begin
        g <-- 1
        return x
    End

    Algo
    Begin
        print f(1)
    End
  "#,
  "Variable 'g' is not declared"
}

check_error! {
  calling_a_number_is_illegal,
  r#"
    Algo
        x: int
    Begin
        x <-- 1
        print x(2)
    End
  "#,
  "Illegal operation"
}
