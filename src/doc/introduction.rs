/*!
# Introductory Tutorial for Micro BASIC

Run the executable from a terminal. You should see the banner, the number
of bytes free for your program, and the `READY.` prompt. Type CTRL-D to
exit and CTRL-C to stop a running program.
<pre><code>&nbsp;  MICRO BASIC
&nbsp;  4096 BYTES FREE
&nbsp;  READY.
&nbsp;> █
</code></pre>

A line typed without a number runs immediately. This is direct mode.

<pre><code>&nbsp;> print "Hello World"
&nbsp;  Hello World
</code></pre>

A line that starts with a number between 1 and 65535 is checked and stored
instead. Typing a number alone deletes that line. Lines are kept in order
no matter the order you type them in.

<pre><code>&nbsp;> 20 goto 10
&nbsp;> 10 print "Hello World"
&nbsp;> list
&nbsp;  10 PRINT "Hello World"
&nbsp;  20 GOTO 10
&nbsp;> run
</code></pre>

Mistakes are caught when the line is entered, not when it runs.

<pre><code>&nbsp;> 30 print "A" + 1
&nbsp;  ?NUMERIC EXPR EXPECTED IN 30
</code></pre>

Everything lives in one block of memory: your program, its variables and
the GOSUB return addresses. A long program leaves less room for arrays
and strings, and running out is reported as `OUT OF MEMORY`.

Save a program with `SAVE` and get it back with `LOAD`. There are six
slots numbered 0 to 5. `SAVE+` saves to slot 0 and marks it to run when
Micro BASIC starts. `DIR` shows the slots in use and `DELETE "PROGRAM2"`
empties one.

Type `TAB` after a line number to bring that line back for editing.

## Environment

* `BASIC_MEMORY` sets the memory size in bytes. The default is 4096.
* `BASIC_SLOTS` sets the directory for saved programs.
* `BASIC_LOG` turns on logging to stderr at a level such as `debug`.

*/
