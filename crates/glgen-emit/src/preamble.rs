//! Fixed C text emitted around the generated declarations.

/// Top of the generated header: include-guard defines that keep stock GL
/// headers from being pulled in afterwards, the `GL_APIENTRY` calling
/// convention macro, and the opening of the `extern "C"` block.
pub const HEADER_PREAMBLE: &str = r#"
/* This file was auto-generated by glgen */
#ifndef _GLGEN_HEADER_
#define _GLGEN_HEADER_
#if defined(__gl_h_) || defined(__GL_H__) || defined(__glext_h_) || defined(__GLEXT_H_) || defined(__gltypes_h_) || defined(__glcorearb_h_) || defined(__gl_glcorearb_h)
#error glgen-generated header included after a GL header.
#endif

#define __gl_h_ 1
#define __gl32_h_ 1
#define __gl31_h_ 1
#define __GL_H__ 1
#define __glext_h_ 1
#define __GLEXT_H_ 1
#define __gltypes_h_ 1
#define __glcorearb_h_ 1
#define __gl_glcorearb_h_ 1

#if defined(_WIN32)
#define WIN32_LEAN_AND_MEAN
#include <windows.h>
#define GL_APIENTRY APIENTRY
#else
#define GL_APIENTRY
#endif

#if defined(__cplusplus)
extern "C" {
#endif
"#;

/// Top of the generated source: the per-platform `GlgenGetProcAddress`
/// used by the lazy loader stubs. Omitted in null-driver mode.
pub const SOURCE_PREAMBLE: &str = r#"
/* This file was auto-generated by glgen */
#include <assert.h>
#if defined(_WIN32)
void* GlgenGetProcAddress(const char *name) {
  static HMODULE opengl32module = NULL;
  static PROC(WINAPI *wgl_get_proc_address)(LPCSTR name) = NULL;
  if (!wgl_get_proc_address) {
    if (!opengl32module) {
      opengl32module = LoadLibraryA("opengl32.dll");
    }
    wgl_get_proc_address = (PROC(WINAPI*)(LPCSTR))GetProcAddress(opengl32module, "wglGetProcAddress");
    assert(wgl_get_proc_address);
  }
  void *ptr = (void *)wgl_get_proc_address(name);
  if(ptr == 0 || (ptr == (void*)1) || (ptr == (void*)2) || (ptr == (void*)3) ||
     (ptr == (void*)-1) ) {
    if (opengl32module == NULL) {
      opengl32module = LoadLibraryA("opengl32.dll");
      assert(opengl32module);
    }
    ptr = (void *)GetProcAddress(opengl32module, name);
  }
  return ptr;
}

#elif defined(__APPLE__)
#include <dlfcn.h>

static void* GlgenGetProcAddress (const char *name)
{
  static void* lib = NULL;
  if (NULL == lib)
    lib = dlopen(
      "/System/Library/Frameworks/OpenGL.framework/Versions/Current/OpenGL",
      RTLD_LAZY);
  return lib ? dlsym(lib, name) : NULL;
}
#elif defined(__ANDROID__)
#include <dlfcn.h>
#if GLGEN_API_VER_MAJ == 3
#define GLGEN_GLES_LIB "libGLESv3.so"
#elif GLGEN_API_VER_MAJ == 2
#define GLGEN_GLES_LIB "libGLESv2.so"
#else
#define GLGEN_GLES_LIB "libGLESv1_CM.so"
#endif
static void* GlgenGetProcAddress(const char *name)
{
  static void* lib = NULL;
  if (NULL == lib) {
    lib = dlopen(GLGEN_GLES_LIB, RTLD_LAZY);
    assert(lib);
  }
  return lib ? dlsym(lib, name) : NULL;
}

#else

#include <GL/glx.h>
#define GlgenGetProcAddress(name) (*glXGetProcAddressARB)((const GLubyte*)name)

#endif

"#;
