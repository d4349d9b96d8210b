check! {
  precedence_mul_before_add,
  r#"
    Algo
        x: int
    Begin
        x <-- 2 + 3*4
        print x
    End
  "#,
  "14\n"
}

check! {
  string_concat,
  r#"
    Algo
        s: str
    Begin
        s <-- "a" + "b"
        print s
    End
  "#,
  "ab\n"
}

check! {
  string_concat_number,
  r#"
    Algo
        s: str
    Begin
        s <-- "a" + 1
        print s
    End
  "#,
  "a1\n"
}

check! {
  exact_division_yields_floats,
  r#"
    Algo
    Begin
        print 7 / 2
        print 10 / 5
    End
  "#,
  "3.5\n2\n"
}

check! {
  floor_division_and_remainder,
  r#"
    Algo
    Begin
        print 7 div 2
        print -7 div 2
        print 7 mod 3
        print -7 mod 3
    End
  "#,
  "3\n-4\n1\n2\n"
}

check! {
  power_is_right_associative,
  r#"
    Algo
    Begin
        print 2 ** 10
        print 2 ** 3 ** 2
        print 2 ** -1
    End
  "#,
  "1024\n512\n0.5\n"
}

check! {
  comparisons_yield_zero_or_one,
  r#"
    Algo
    Begin
        print 1 < 2
        print 2 <= 1
        print 2 > 1
        print 1 >= 2
        print 1 == 1
        print 1 != 1
    End
  "#,
  "1\n0\n1\n0\n1\n0\n"
}

check! {
  logic_yields_the_deciding_operand,
  r#"
    Algo
    Begin
        print 1 and 5
        print 0 and 5
        print 0 or 7
        print 3 or 7
        print not 0
        print not 9
    End
  "#,
  "5\n0\n7\n3\n1\n0\n"
}

check! {
  unary_minus,
  r#"
    Algo
        x: int
    Begin
        x <-- -3
        print -x
        print -x + 1
    End
  "#,
  "3\n4\n"
}

check! {
  booleans_are_numbers,
  r#"
    Algo
        b: bool
    Begin
        b <-- True
        print b
        print False
        print true
        print false
    End
  "#,
  "1\n0\n1\n0\n"
}

check! {
  mixed_int_float_arithmetic,
  r#"
    Algo
    Begin
        print 1 + 0.5
        print 2 * 1.5
        print 5.
    End
  "#,
  "1.5\n3\n5\n"
}

check! {
  predefined_constants,
  r#"
    Algo
    Begin
        print NULL
        print Pi
    End
  "#,
  "0\n3.141592653589793\n"
}

check_error! {
  division_by_zero,
  r#"
    Algo
        x: int
    Begin
        x <-- 10 / 0
    End
  "#,
  "Division by 0"
}

check_error! {
  floor_division_by_zero,
  r#"
    Algo
    Begin
        print 10 div 0
    End
  "#,
  "Division by 0"
}

check_error! {
  modulo_by_zero,
  r#"
    Algo
    Begin
        print 10 mod 0
    End
  "#,
  "Division by 0"
}

check_error! {
  subtracting_strings_is_illegal,
  r#"
    Algo
    Begin
        print "a" - 1
    End
  "#,
  "Illegal operation"
}
