/*!
# Statements

Statements on one line are separated by `:`. The statement after
`IF ... THEN` needs no separator and runs only when the condition is
not zero; otherwise the rest of the line is skipped.

```text
10 IF X > 5 THEN PRINT "BIG": GOTO 100
```

| Statement                  | Effect                                          |
|----------------------------|-------------------------------------------------|
| `LET V = X` or `V = X`     | assign a variable or array element              |
| `PRINT X; Y`               | print values; a final `;` keeps the line open   |
| `INPUT V`                  | read a value typed by the user                  |
| `GOTO n`                   | continue at line n or the next line after it    |
| `GOSUB n` / `RETURN`       | call and return from a subroutine               |
| `FOR V = A TO B STEP C`    | loop; the body always runs at least once        |
| `NEXT V`                   | step V and loop while it is within range        |
| `DIM A(n, ..)`             | create an array                                 |
| `REM text`                 | comment to the end of the line                  |
| `STOP` / `CONT`            | stop a program and continue after the STOP      |
| `RUN [n]`                  | clear variables and run from the start or n     |
| `LIST [a][,b]`             | show the program or the lines from a to b       |
| `NEW`                      | erase the program and variables                 |
| `CLS`                      | clear the screen                                |
| `PAUSE ms`                 | wait                                            |
| `POSITION x, y`            | move the cursor                                 |
| `PINMODE p, m` `PIN p, s`  | configure and set a pin                         |
| `SAVE [n]` `SAVE+` `LOAD [n]` | store and restore programs                   |
| `DIR` `DELETE "name"`      | list and remove saved programs                  |

`GOTO`, `GOSUB` and `RUN` all take expressions, so `GOTO 100 + X * 10`
works as a computed jump.

*/
