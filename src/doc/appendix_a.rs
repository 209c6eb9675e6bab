/*!
# Error Messages

Errors print with a leading `?` and the line number when the error
happened inside the program.

| Message                | Cause                                               |
|------------------------|-----------------------------------------------------|
| BAD NUMBER             | a number could not be read                          |
| LINE TOO LONG          | the line does not fit the token buffer              |
| UNEXPECTED INPUT       | a character that can't start a token                |
| UNTERMINATED STRING    | missing closing quote                               |
| MISSING BRACKET        | missing `(` or `)`                                  |
| ERROR IN EXPR          | an expression is malformed                          |
| NUMERIC EXPR EXPECTED  | a string was given where a number is needed         |
| STRING EXPR EXPECTED   | a number was given where a string is needed         |
| LINE NUMBER TOO BIG    | line numbers stop at 65535                          |
| OUT OF MEMORY          | the program, stack and variables don't fit          |
| DIV BY ZERO            | `/` or `MOD` by zero                                |
| VARIABLE NOT FOUND     | a variable was read before it was assigned          |
| BAD COMMAND            | a statement is not recognized or is out of place    |
| BAD LINE NUMBER        | a jump target is below 1 or too large               |
| BREAK PRESSED          | CTRL-C while running, or input was cancelled        |
| NEXT WITHOUT FOR       | NEXT for a variable with no active FOR              |
| STOP STATEMENT         | STOP was executed; CONT continues                   |
| MISSING THEN IN IF     | IF without THEN                                     |
| RETURN WITHOUT GOSUB   | RETURN with nothing to return to                    |
| WRONG ARRAY DIMS       | wrong number of subscripts                          |
| BAD ARRAY INDEX        | a subscript is outside the array                    |
| BAD STRING INDEX       | a string function got a bad position or length     |
| ERROR IN VAL INPUT     | the string given to VAL is not a numeric expression |
| BAD PARAMETER          | a slot number, delay or file name is out of range   |

*/
