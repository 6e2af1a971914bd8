//! Language-level names the engine needs without reading any documentation page.

/// Package whose types are visible without an import.
pub const DEFAULT_IMPORT_PACKAGE: &str = "java.lang";

/// Root of every class hierarchy.
pub const ROOT_OBJECT: &str = "java.lang.Object";

/// Primitive types, plus `void`, which never need qualification.
pub const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Simple names of the commonly referenced types in the implicit-import package.
pub const IMPLICIT_TYPES: &[&str] = &[
    "AbstractMethodError", "Appendable", "ArithmeticException", "ArrayIndexOutOfBoundsException",
    "ArrayStoreException", "AssertionError", "AutoCloseable", "Boolean", "Byte", "CharSequence",
    "Character", "Class", "ClassCastException", "ClassLoader", "ClassNotFoundException",
    "CloneNotSupportedException", "Cloneable", "Comparable", "Deprecated", "Double", "Enum",
    "Error", "Exception", "Float", "FunctionalInterface", "IllegalAccessException",
    "IllegalArgumentException", "IllegalStateException", "IndexOutOfBoundsException",
    "InstantiationException", "Integer", "InterruptedException", "Iterable", "LinkageError",
    "Long", "Math", "NegativeArraySizeException", "NoSuchFieldException", "NoSuchMethodException",
    "NullPointerException", "Number", "NumberFormatException", "Object", "OutOfMemoryError",
    "Override", "Process", "Readable", "Record", "ReflectiveOperationException", "Runnable",
    "Runtime", "RuntimeException", "SafeVarargs", "SecurityException", "Short",
    "StackOverflowError", "String", "StringBuffer", "StringBuilder",
    "StringIndexOutOfBoundsException", "SuppressWarnings", "System", "Thread", "ThreadLocal",
    "Throwable", "TypeNotPresentException", "UnsupportedOperationException", "Void",
];

/// Determine whether `name` is a primitive type keyword or `void`.
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

/// Determine whether `name` is a well-known type of the implicit-import package.
pub fn is_implicit_type(name: &str) -> bool {
    IMPLICIT_TYPES.binary_search(&name).is_ok()
}
