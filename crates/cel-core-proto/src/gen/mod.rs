//! Protobuf messages from cel-spec `checked.proto`.
//!
//! Only `cel.expr.Type` and its nested messages are defined here. The layout
//! follows prost-build output so the types read the same as generated code.

// Re-export prost_types for the generated code
pub use prost_types;

pub mod cel {
    pub mod expr {
        /// Represents a CEL type.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Type {
            /// The kind of type.
            #[prost(
                oneof = "r#type::TypeKind",
                tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 14"
            )]
            pub type_kind: ::core::option::Option<r#type::TypeKind>,
        }

        // Not part of prost-build output: nested types are released from a
        // heap work-list so a deep message can be dropped on any stack.
        impl Drop for Type {
            fn drop(&mut self) {
                use r#type::TypeKind;

                let mut pending: Vec<TypeKind> = match self.type_kind.take() {
                    Some(kind) if has_nested_types(&kind) => vec![kind],
                    _ => return,
                };
                while let Some(kind) = pending.pop() {
                    match kind {
                        TypeKind::ListType(mut list) => {
                            push(list.elem_type.as_deref_mut(), &mut pending);
                        }
                        TypeKind::MapType(mut map) => {
                            push(map.key_type.as_deref_mut(), &mut pending);
                            push(map.value_type.as_deref_mut(), &mut pending);
                        }
                        TypeKind::Function(mut function) => {
                            push(function.result_type.as_deref_mut(), &mut pending);
                            for arg in &mut function.arg_types {
                                push(Some(arg), &mut pending);
                            }
                        }
                        TypeKind::Type(mut inner) => push(Some(&mut *inner), &mut pending),
                        TypeKind::AbstractType(mut abstract_type) => {
                            for param in &mut abstract_type.parameter_types {
                                push(Some(param), &mut pending);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        fn push(ty: Option<&mut Type>, pending: &mut Vec<r#type::TypeKind>) {
            if let Some(kind) = ty.and_then(|ty| ty.type_kind.take()) {
                if has_nested_types(&kind) {
                    pending.push(kind);
                }
            }
        }

        fn has_nested_types(kind: &r#type::TypeKind) -> bool {
            use r#type::TypeKind;

            matches!(
                kind,
                TypeKind::ListType(_)
                    | TypeKind::MapType(_)
                    | TypeKind::Function(_)
                    | TypeKind::Type(_)
                    | TypeKind::AbstractType(_)
            )
        }

        /// Nested message and enum types in `Type`.
        pub mod r#type {
            /// List type with typed elements, e.g. `list<example.proto.MyMessage>`.
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct ListType {
                /// The element type.
                #[prost(message, optional, boxed, tag = "1")]
                pub elem_type: ::core::option::Option<::prost::alloc::boxed::Box<super::Type>>,
            }

            /// Map type with parameterized key and value types, e.g. `map<string, int>`.
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct MapType {
                /// The type of the key.
                #[prost(message, optional, boxed, tag = "1")]
                pub key_type: ::core::option::Option<::prost::alloc::boxed::Box<super::Type>>,
                /// The type of the value.
                #[prost(message, optional, boxed, tag = "2")]
                pub value_type: ::core::option::Option<::prost::alloc::boxed::Box<super::Type>>,
            }

            /// Function type with result and arg types.
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct FunctionType {
                /// Result type of the function.
                #[prost(message, optional, boxed, tag = "1")]
                pub result_type: ::core::option::Option<::prost::alloc::boxed::Box<super::Type>>,
                /// Argument types of the function.
                #[prost(message, repeated, tag = "2")]
                pub arg_types: ::prost::alloc::vec::Vec<super::Type>,
            }

            /// Application defined abstract type.
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct AbstractType {
                /// The fully qualified name of this abstract type.
                #[prost(string, tag = "1")]
                pub name: ::prost::alloc::string::String,
                /// Parameter types for this abstract type.
                #[prost(message, repeated, tag = "2")]
                pub parameter_types: ::prost::alloc::vec::Vec<super::Type>,
            }

            /// CEL primitive types.
            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
            )]
            #[repr(i32)]
            pub enum PrimitiveType {
                /// Unspecified type.
                Unspecified = 0,
                /// Boolean type.
                Bool = 1,
                /// Int64 type.
                ///
                /// 32-bit integer values are widened to int64.
                Int64 = 2,
                /// Uint64 type.
                ///
                /// 32-bit unsigned integer values are widened to uint64.
                Uint64 = 3,
                /// Double type.
                ///
                /// 32-bit float values are widened to double values.
                Double = 4,
                /// String type.
                String = 5,
                /// Bytes type.
                Bytes = 6,
            }

            /// Well-known protobuf types treated with first-class support in CEL.
            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
            )]
            #[repr(i32)]
            pub enum WellKnownType {
                /// Unspecified type.
                Unspecified = 0,
                /// Well-known protobuf.Any type.
                ///
                /// Any types are a polymorphic message type. During type-checking they are
                /// treated like `DYN` types, but at runtime they are resolved to a specific
                /// message type specified at evaluation time.
                Any = 1,
                /// Well-known protobuf.Timestamp type, internally referenced as `timestamp`.
                Timestamp = 2,
                /// Well-known protobuf.Duration type, internally referenced as `duration`.
                Duration = 3,
            }

            /// The kind of type.
            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum TypeKind {
                /// Dynamic type.
                #[prost(message, tag = "1")]
                Dyn(()),
                /// Null value.
                #[prost(enumeration = "::prost_types::NullValue", tag = "2")]
                Null(i32),
                /// Primitive types: `true`, `1u`, `-2.0`, `'string'`, `b'bytes'`.
                #[prost(enumeration = "PrimitiveType", tag = "3")]
                Primitive(i32),
                /// Wrapper of a primitive type, e.g. `google.protobuf.Int64Value`.
                #[prost(enumeration = "PrimitiveType", tag = "4")]
                Wrapper(i32),
                /// Well-known protobuf type such as `google.protobuf.Timestamp`.
                #[prost(enumeration = "WellKnownType", tag = "5")]
                WellKnown(i32),
                /// Parameterized list with elements of `list_type`, e.g. `list<timestamp>`.
                #[prost(message, tag = "6")]
                ListType(::prost::alloc::boxed::Box<ListType>),
                /// Parameterized map with typed keys and values.
                #[prost(message, tag = "7")]
                MapType(::prost::alloc::boxed::Box<MapType>),
                /// Function type.
                #[prost(message, tag = "8")]
                Function(::prost::alloc::boxed::Box<FunctionType>),
                /// Protocol buffer message type.
                ///
                /// The `message_type` string specifies the qualified message type name.
                #[prost(string, tag = "9")]
                MessageType(::prost::alloc::string::String),
                /// Type param type.
                ///
                /// The `type_param` string specifies the type parameter name, e.g. `list<E>`
                /// would be a `list_type` whose element type was a `type_param` type
                /// named `E`.
                #[prost(string, tag = "10")]
                TypeParam(::prost::alloc::string::String),
                /// Type type.
                ///
                /// The `type` value specifies the target type. e.g. int is type with a
                /// target type of `Primitive.INT64`.
                #[prost(message, tag = "11")]
                Type(::prost::alloc::boxed::Box<super::Type>),
                /// Error type.
                ///
                /// During type-checking if an expression is an error, its type is propagated
                /// as the `ERROR` type.
                #[prost(message, tag = "12")]
                Error(()),
                /// Abstract, application defined type.
                #[prost(message, tag = "14")]
                AbstractType(AbstractType),
            }
        }
    }
}
