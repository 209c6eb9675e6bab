/*!
# Expressions and Types

There are two types: 32-bit floating point numbers and strings of bytes.
A variable name is letters and digits starting with a letter. Names ending
in `$` hold strings. Only the first 16 characters of a name count, and case
does not matter.

```text
LET PI = 3.14
NAME$ = "ADA"
```

A variable must be assigned before it is read. Reading one that was never
assigned is an error rather than a silent zero.

Numbers are written as integers or with a decimal point. Strings are in
double quotes; put two quotes in a row for one quote character.

```text
PRINT "SAY ""HI"""
SAY "HI"
```

## Operators

From lowest to highest precedence:

| Operators             | Notes                                  |
|-----------------------|----------------------------------------|
| `AND` `OR`            | `A AND B` is A when B is true, else 0  |
| `=` `<>`              | result is 1 or 0                       |
| `<` `>` `<=` `>=`     | strings compare byte by byte           |
| `+` `-`               | `+` joins strings                      |
| `*` `/` `MOD`         | `MOD` works on whole numbers           |

Unary `-` and `NOT` bind tighter than any of these. Operators of equal
precedence group to the left, so `10-4-3` is 3.

## Arrays

`DIM A(3,4)` makes a 3 by 4 array numbered from 1. Elements start at 0
or the empty string. `DIM` again with the same name replaces the array.

## Functions

| Function          | Result                                            |
|-------------------|---------------------------------------------------|
| `LEN(S$)`         | length of the string                              |
| `VAL(S$)`         | the string evaluated as a numeric expression      |
| `INT(X)`          | largest whole number not above X                  |
| `STR$(X)`         | the number as PRINT would show it                 |
| `LEFT$(S$,N)`     | the first N characters                            |
| `RIGHT$(S$,N)`    | the last N characters                             |
| `MID$(S$,I,N)`    | N characters from position I, counting from 1     |
| `RND`             | a random number from 0 up to but not including 1  |
| `INKEY$`          | the last key pressed, or an empty string          |
| `PINREAD(P)`      | the digital state of pin P                        |
| `ANALOGRD(P)`     | the analog reading of pin P                       |

*/
