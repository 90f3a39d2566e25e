static TEXT: &[&str] = &[
    "Usage: calsheet [OPTIONS]\n",
    "\n",
    "Render printable monthly calendar pages as SVG files\n",
    "\n",
    "Options:\n",
    "  -n, --months <N>          Number of months to generate [default: 1]\n",
    "  -m, --month <1-12>        Month to start from [default: current month]\n",
    "  -y, --year <YEAR>         Year to start from [default: current year]\n",
    "  -w, --week-start <DAY>    First day of each week: monday or sunday\n",
    "                            [default: monday]\n",
    "  -l, --line-height <PX>    Spacing between lines of a note, in pixels\n",
    "                            [default: 30]\n",
    "  -N, --notes <PATH>        CSV file with \"month\" and \"note\" columns\n",
    "  -o, --output-dir <DIR>    Directory to write the SVG files to [default: .]\n",
    "  -v, --verbose             Show more log output; repeat for even more\n",
    "  -h, --help                Display this help message and exit\n",
    "  -V, --version             Show the program version and exit\n",
];

pub(crate) fn usage() -> String {
    TEXT.concat()
}
