check! {
  create_set_and_read,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array(3)
        T[0] <-- 10
        print T[0]
    End
  "#,
  "10\n"
}

check! {
  size_of_each_dimension,
  r#"
    Algo
        M: array of int
    Begin
        M <-- create_array(2, 3)
        print size(M)
        print size(M[0])
    End
  "#,
  "2\n3\n"
}

check! {
  cells_start_as_the_empty_string,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array(2)
        print T[1]
    End
  "#,
  "\n"
}

check! {
  nested_assignment,
  r#"
    Algo
        M: array of int
    Begin
        M <-- create_array(2, 3)
        M[1][2] <-- 9
        print M[1][2]
        print M[0][2]
    End
  "#,
  "9\n\n"
}

check! {
  rows_mutate_independently,
  r#"
    Algo
        M: array of int
    Begin
        M <-- create_array(2, 2)
        M[0][0] <-- 1
        print M[1][0]
    End
  "#,
  "\n"
}

check! {
  index_expressions_are_evaluated,
  r#"
    Algo
        T: array of int
        i: int
    Begin
        T <-- create_array(3)
        i <-- 1
        T[i + 1] <-- 5
        print T[2]
        print T[i]
    End
  "#,
  "5\n\n"
}

check! {
  printing_a_list_joins_its_elements,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array(3)
        T[0] <-- 1
        T[1] <-- 2
        T[2] <-- 3
        print T
    End
  "#,
  "1, 2, 3\n"
}

check! {
  aliases_share_the_same_cells,
  r#"
    Algo
        T: array of int
        U: array of int
    Begin
        T <-- create_array(2)
        U <-- T
        U[0] <-- 4
        print T[0]
    End
  "#,
  "4\n"
}

check! {
  division_indexes_into_a_list,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array(2)
        T[1] <-- 8
        print T / 1
    End
  "#,
  "8\n"
}

check_error! {
  reading_out_of_range,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array(2)
        print T[5]
    End
  "#,
  "Index access error"
}

check_error! {
  negative_indices_are_rejected,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array(2)
        print T[-1]
    End
  "#,
  "Index access error"
}

check_error! {
  writing_out_of_range,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array(2)
        T[2] <-- 1
    End
  "#,
  "Out-of-bounds index"
}

check_error! {
  indices_must_be_numbers,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array(2)
        print T["a"]
    End
  "#,
  "The index must be a number"
}

check_error! {
  sizes_must_be_numbers,
  r#"
    Algo
        T: array of int
    Begin
        T <-- create_array("a")
    End
  "#,
  "Array sizes must be numbers"
}

check_error! {
  size_requires_an_array,
  r#"
    Algo
    Begin
        print size(3)
    End
  "#,
  "Argument to 'size' must be an array"
}
