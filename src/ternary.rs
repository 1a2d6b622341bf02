// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// I'm fond of the ternary operator.  Rust's ifs are already
// expressions, but `cargo fmt` breaks them up line-by-line, and the
// edge-clamping rules for neighbours and parents read much better as
// a column of one-liners.  Only the chosen branch is evaluated, so
// `cq!(x == 0, here, map[(x - 1, y)])` never underflows.
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
