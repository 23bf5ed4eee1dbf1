//! Integration tests of the yabp parser, see the `tests` directory.
