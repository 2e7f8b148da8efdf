//! GLSL sources for hosts that run the transition on the GPU.
//!
//! The fragment program is the GPU form of [`crate::lens::compositor::Compositor::shade`]. It
//! expects the host to bind the uniforms listed in [`UNIFORM_NAMES`] and to draw a quad whose
//! `uv` attribute spans `[0, 1]^2`.

/// Passes the quad `uv` through as `vUv` and applies the host's projection and model-view.
pub const VERTEX_SHADER: &str = r#"
  varying vec2 vUv;
  void main() {
    vUv = uv;
    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
  }
"#;

pub const FRAGMENT_SHADER: &str = r#"
  uniform sampler2D uTexture1;
  uniform sampler2D uTexture2;
  uniform float uProgress;
  uniform vec2 uResolution;
  uniform vec2 uTexture1Size;
  uniform vec2 uTexture2Size;
  varying vec2 vUv;

  vec2 getCoverUV(vec2 uv, vec2 textureSize) {
    vec2 s = uResolution / textureSize;
    float scale = max(s.x, s.y);
    vec2 scaledSize = textureSize * scale;
    vec2 offset = (uResolution - scaledSize) * 0.5;
    return (uv * uResolution - offset) / scaledSize;
  }

  vec2 getDistortedUv(vec2 uv, vec2 direction, float factor) {
    vec2 scaleDirection = vec2(direction.x, direction.y * 2.0);
    return uv - scaleDirection * factor;
  }

  struct LensDistortion {
    vec2 distortionUV;
    float inside;
  };

  LensDistortion getLensDistortion(
    vec2 p, vec2 uv, vec2 sphereCenter, float sphereRadius, float focusFactor) {
    vec2 distortionDirection = normalize(p - sphereCenter);
    float focusRadius = sphereRadius * focusFactor;
    float focusStrength = sphereRadius / 3000.0;
    float focusSdf = length(sphereCenter - p) - focusRadius;
    float sphereSdf = length(sphereCenter - p) - sphereRadius;

    float inside = smoothstep(0.0, 1.0, -sphereSdf / (focusRadius * 0.001));

    float magnifierFactor = (sphereRadius - focusRadius) != 0.0 ? focusSdf / (sphereRadius - focusRadius) : 0.0;
    float mFactor = clamp(magnifierFactor * inside, 0.0, 1.0);
    mFactor = pow(mFactor, 5.0);

    float distortionFactor = mFactor * focusStrength;
    vec2 distortedUV = getDistortedUv(uv, distortionDirection, distortionFactor);
    return LensDistortion(distortedUV, inside);
  }

  void main() {
    vec2 center = vec2(0.5, 0.5);
    vec2 p = vUv * uResolution;
    vec2 uv1 = getCoverUV(vUv, uTexture1Size);
    vec2 uv2 = getCoverUV(vUv, uTexture2Size);

    float maxRadius = length(uResolution) * 1.5;
    float bubbleRadius = maxRadius * uProgress;
    vec2 sphereCenter = center * uResolution;
    float focusFactor = 0.25;

    float dist = length(sphereCenter - p);
    float mask = step(bubbleRadius, dist);

    vec4 currentImg = texture2D(uTexture1, clamp(uv1, 0.0, 1.0));
    LensDistortion distortion = getLensDistortion(p, uv2, sphereCenter, bubbleRadius, focusFactor);

    vec4 newImg = texture2D(uTexture2, clamp(distortion.distortionUV, 0.0, 1.0));
    float finalMask = max(mask, 1.0 - distortion.inside);
    vec4 color = mix(newImg, currentImg, finalMask);
    gl_FragColor = color;
  }
"#;

pub const UNIFORM_TEXTURE1: &str = "uTexture1";
pub const UNIFORM_TEXTURE2: &str = "uTexture2";
pub const UNIFORM_PROGRESS: &str = "uProgress";
pub const UNIFORM_RESOLUTION: &str = "uResolution";
pub const UNIFORM_TEXTURE1_SIZE: &str = "uTexture1Size";
pub const UNIFORM_TEXTURE2_SIZE: &str = "uTexture2Size";

/// Every uniform the fragment program declares, in declaration order.
pub const UNIFORM_NAMES: [&str; 6] = [
    UNIFORM_TEXTURE1,
    UNIFORM_TEXTURE2,
    UNIFORM_PROGRESS,
    UNIFORM_RESOLUTION,
    UNIFORM_TEXTURE1_SIZE,
    UNIFORM_TEXTURE2_SIZE,
];
